pub mod paths;
pub mod storage;
pub mod whitelist_source;

pub use crate::paths::RecipePaths;
pub use crate::storage::{ConfigStorage, SecretStorage};
pub use crate::whitelist_source::{WhitelistLoader, WhitelistSource};
