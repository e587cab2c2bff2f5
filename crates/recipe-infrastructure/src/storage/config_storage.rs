//! Game config file storage.
//!
//! Reads `config.toml` into [`GameConfig`]. A missing or empty file is not an
//! error; the built-in defaults apply.

use std::fs;
use std::path::PathBuf;

use recipe_core::GameConfig;
use recipe_core::error::{RecipeError, Result};
use tracing::debug;

use crate::paths::RecipePaths;

/// Read-only access to the game's `config.toml`.
///
/// Responsibilities:
/// - Locate config.toml (default location or explicit path)
/// - Parse TOML into `GameConfig`, filling omitted fields with defaults
///
/// Does NOT:
/// - Write or migrate the file
/// - Load API keys (see `SecretStorage`)
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a storage pointing at the default config.toml.
    pub fn new() -> Result<Self> {
        let path = RecipePaths::config_file().map_err(|e| RecipeError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a storage with a custom path (for `--config` and testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the config, falling back to defaults when the file is absent.
    pub fn load(&self) -> Result<GameConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "config file not found, using defaults");
            return Ok(GameConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(GameConfig::default());
        }

        let config: GameConfig = toml::from_str(&content)?;
        debug!(path = %self.path.display(), "loaded config");
        Ok(config)
    }

    /// Loads the config and fails if the file does not exist.
    ///
    /// Used for explicitly requested paths where silently falling back to
    /// defaults would hide a typo.
    pub fn load_required(&self) -> Result<GameConfig> {
        if !self.path.exists() {
            return Err(RecipeError::not_found(
                "config file",
                self.path.display().to_string(),
            ));
        }
        self.load()
    }
}
