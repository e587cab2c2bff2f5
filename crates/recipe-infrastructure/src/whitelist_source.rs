//! Loads the optional ingredient whitelist from a file or URL.
//!
//! The list is fetched at most once per loader; later calls return the cached
//! copy for the rest of the process.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use recipe_core::error::{RecipeError, Result};
use recipe_core::validation::IngredientWhitelist;
use tokio::sync::OnceCell;
use tracing::info;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Where the newline-delimited ingredient list lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhitelistSource {
    File(PathBuf),
    Url(String),
}

impl WhitelistSource {
    /// `http://` and `https://` locations are URLs, anything else a path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }

    async fn fetch_text(&self) -> Result<String> {
        match self {
            Self::File(path) => Ok(tokio::fs::read_to_string(path).await?),
            Self::Url(url) => {
                let client = reqwest::Client::builder()
                    .timeout(FETCH_TIMEOUT)
                    .build()
                    .map_err(|e| RecipeError::network(format!("failed to create HTTP client: {e}")))?;
                let response = client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| RecipeError::network(format!("whitelist request failed: {e}")))?;
                if !response.status().is_success() {
                    return Err(RecipeError::network(format!(
                        "whitelist request to {url} returned {}",
                        response.status()
                    )));
                }
                response
                    .text()
                    .await
                    .map_err(|e| RecipeError::network(format!("failed to read whitelist body: {e}")))
            }
        }
    }
}

/// Fetches a whitelist once and hands out the cached copy afterwards.
pub struct WhitelistLoader {
    source: WhitelistSource,
    cached: OnceCell<Arc<IngredientWhitelist>>,
}

impl WhitelistLoader {
    pub fn new(source: WhitelistSource) -> Self {
        Self {
            source,
            cached: OnceCell::new(),
        }
    }

    /// Returns the whitelist, fetching it on first use.
    ///
    /// A failed fetch is not cached, so a later call retries.
    pub async fn load(&self) -> Result<Arc<IngredientWhitelist>> {
        self.cached
            .get_or_try_init(|| async {
                let text = self.source.fetch_text().await?;
                let whitelist = IngredientWhitelist::parse(&text);
                if whitelist.is_empty() {
                    return Err(RecipeError::config(format!(
                        "whitelist {:?} contains no ingredients",
                        self.source
                    )));
                }
                info!(count = whitelist.len(), source = ?self.source, "loaded ingredient whitelist");
                Ok(Arc::new(whitelist))
            })
            .await
            .cloned()
    }
}
