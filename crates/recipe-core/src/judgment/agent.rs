//! The seam between the game and whatever model backend judges it.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One text-generation call: a fully rendered prompt plus sampling bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Failures raised by a judge backend while producing text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    /// The backend could not be configured or returned nothing usable.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// The remote endpoint answered with an error or could not be reached.
    #[error("{message}")]
    ProcessError {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
    },

    #[error("Judge did not answer within {0:?}")]
    Timeout(Duration),
}

impl AgentError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ExecutionFailed(_) => false,
            Self::ProcessError { is_retryable, .. } => *is_retryable,
            Self::Timeout(_) => true,
        }
    }
}

/// A remote text generator used as the dish judge.
///
/// Implementations only move text; prompt construction and reply parsing
/// live in [`super::JudgmentClient`].
#[async_trait]
pub trait JudgeAgent: Send + Sync {
    /// Short human-readable backend name for logs.
    fn name(&self) -> &str;

    async fn execute(&self, request: JudgeRequest) -> Result<String, AgentError>;
}
