//! External judgment: prompt construction, the backend seam and reply parsing.

mod agent;
mod parse;
mod prompt;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use agent::{AgentError, JudgeAgent, JudgeRequest};
pub use parse::parse_judgment;
pub use prompt::PromptBuilder;

use crate::config::JudgeConfig;
use crate::error::Result;

/// What the judge made of one combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum JudgmentResult {
    /// The ingredients form a plausible dish.
    Viable(String),
    /// They do not; the game ends.
    NotViable(String),
    /// The reply did not follow the two-line format. Holds the raw text.
    Unparseable(String),
    /// The endpoint could not be reached or answered with an error.
    TransportError(String),
}

impl JudgmentResult {
    /// Whether the player should simply resubmit.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unparseable(_) | Self::TransportError(_))
    }
}

/// Asks a [`JudgeAgent`] about one combination and interprets the answer.
#[derive(Clone)]
pub struct JudgmentClient {
    agent: Arc<dyn JudgeAgent>,
    prompt: PromptBuilder,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
}

impl JudgmentClient {
    pub fn new(agent: Arc<dyn JudgeAgent>, config: &JudgeConfig) -> Result<Self> {
        Ok(Self {
            agent,
            prompt: PromptBuilder::new(config.prompt_template.clone())?,
            max_tokens: config.effective_max_tokens(),
            temperature: config.effective_temperature(),
            timeout: Duration::from_secs(config.timeout_secs.max(1)),
        })
    }

    /// Overrides the overall deadline for one judgment.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }

    /// Judges `base` combined with `additions`.
    ///
    /// Never fails: transport problems and timeouts become
    /// [`JudgmentResult::TransportError`].
    pub async fn judge(&self, base: &str, additions: &[String]) -> JudgmentResult {
        let prompt = match self.prompt.render(base, additions) {
            Ok(prompt) => prompt,
            Err(err) => return JudgmentResult::TransportError(err.to_string()),
        };
        debug!(agent = self.agent.name(), %prompt, "requesting judgment");

        let request = JudgeRequest {
            prompt,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let reply = match tokio::time::timeout(self.timeout, self.agent.execute(request)).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => {
                warn!(agent = self.agent.name(), error = %err, "judge request failed");
                return JudgmentResult::TransportError(err.to_string());
            }
            Err(_) => {
                let err = AgentError::Timeout(self.timeout);
                warn!(agent = self.agent.name(), error = %err, "judge request timed out");
                return JudgmentResult::TransportError(err.to_string());
            }
        };

        debug!(%reply, "judge replied");
        let result = parse_judgment(&reply);
        if let JudgmentResult::Unparseable(_) = result {
            warn!("judge reply did not match the expected format");
        }
        result
    }
}
