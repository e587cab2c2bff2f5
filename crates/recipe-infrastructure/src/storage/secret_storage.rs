//! API key file storage.
//!
//! Reads `secret.json` next to `config.toml`. The file is optional; callers
//! fall back to environment variables when it is missing or holds no key.

use std::fs;
use std::path::PathBuf;

use recipe_core::config::SecretConfig;
use recipe_core::error::{RecipeError, Result};
use tracing::debug;

use crate::paths::RecipePaths;

/// Read-only access to `secret.json`. Never logs the file contents.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Points at the default `secret.json`.
    pub fn new() -> Result<Self> {
        let path = RecipePaths::secret_file().map_err(|e| RecipeError::config(e.to_string()))?;
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Parses the file. A missing file is `NotFound` so callers can tell it
    /// apart from a malformed one.
    pub fn load(&self) -> Result<SecretConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no secret file");
            return Err(RecipeError::not_found(
                "secret file",
                self.path.display().to_string(),
            ));
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_secret(dir: &TempDir, content: &str) -> PathBuf {
        let file_path = dir.path().join("secret.json");
        fs::write(&file_path, content).unwrap();
        file_path
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = SecretStorage::with_path(temp_dir.path().join("secret.json"))
            .load()
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("secret.json"));
    }

    #[test]
    fn test_key_and_model_are_read() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = write_secret(
            &temp_dir,
            r#"{ "openai": { "api_key": "sk-judge", "model_name": "gpt-4o-mini" } }"#,
        );

        let openai = SecretStorage::with_path(file_path)
            .load()
            .unwrap()
            .openai
            .unwrap();
        assert_eq!(openai.api_key, "sk-judge");
        assert_eq!(openai.model_name.as_deref(), Some("gpt-4o-mini"));
    }

    #[test]
    fn test_model_name_is_optional() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = write_secret(&temp_dir, r#"{ "openai": { "api_key": "sk-judge" } }"#);

        let openai = SecretStorage::with_path(file_path)
            .load()
            .unwrap()
            .openai
            .unwrap();
        assert!(openai.model_name.is_none());
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = write_secret(&temp_dir, "{ \"openai\": ");

        let err = SecretStorage::with_path(file_path).load().unwrap_err();
        assert!(err.is_serialization());
        assert!(err.to_string().contains("JSON"));
    }
}
