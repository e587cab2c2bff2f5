//! Path management for infinity-recipe configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/infinity-recipe/   # Config directory (platform specific)
//! ├── config.toml              # Game rules, word lists, judge settings
//! └── secret.json              # API keys
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "infinity-recipe";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves where the game keeps its files.
pub struct RecipePaths;

impl RecipePaths {
    /// Returns the configuration directory (e.g., `~/.config/infinity-recipe/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to config.toml.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_in_app_dir() {
        // CI containers may have no home directory
        let Ok(dir) = RecipePaths::config_dir() else {
            return;
        };
        assert!(dir.ends_with(APP_DIR));
        assert_eq!(RecipePaths::config_file().unwrap(), dir.join("config.toml"));
        assert_eq!(RecipePaths::secret_file().unwrap(), dir.join("secret.json"));
    }
}
