//! Core domain of the Infinity Recipe game.
//!
//! Players chain ingredients onto a base one round at a time; a remote model
//! judges whether the combination is still a plausible dish. This crate holds
//! everything except the model transport and the terminal front end.

pub mod config;
pub mod error;
pub mod judgment;
pub mod session;
pub mod validation;

// Re-export common types
pub use config::GameConfig;
pub use error::RecipeError;
pub use judgment::{JudgeAgent, JudgmentClient, JudgmentResult, parse_judgment};
pub use session::{RecipeGame, RoundResolution, Session, SubmissionError};
