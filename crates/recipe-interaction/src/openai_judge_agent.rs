//! OpenAIJudgeAgent - Direct REST API implementation for OpenAI GPT.
//!
//! Calls the Chat Completions API with the rendered judge prompt as a single
//! user message.
//! Configuration priority: ~/.config/infinity-recipe/secret.json > environment variables

use async_trait::async_trait;
use recipe_core::config::{DEFAULT_JUDGE_BASE_URL, DEFAULT_JUDGE_MODEL};
use recipe_core::judgment::{AgentError, JudgeAgent, JudgeRequest};
use recipe_infrastructure::storage::SecretStorage;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Judge backend that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAIJudgeAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for OpenAIJudgeAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIJudgeAgent")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenAIJudgeAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: build_client(DEFAULT_TIMEOUT),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_JUDGE_BASE_URL.to_string(),
        }
    }

    /// Loads configuration from secret.json or environment variables.
    ///
    /// Priority:
    /// 1. ~/.config/infinity-recipe/secret.json
    /// 2. Environment variables (OPENAI_API_KEY, OPENAI_MODEL_NAME)
    ///
    /// Model name defaults to `gpt-3.5-turbo` if not specified.
    pub fn try_from_env() -> Result<Self, AgentError> {
        if let Ok(storage) = SecretStorage::new() {
            if let Some(agent) = Self::from_secret_storage(&storage) {
                return Ok(agent);
            }
        }

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            AgentError::ExecutionFailed(
                "OPENAI_API_KEY not found in ~/.config/infinity-recipe/secret.json or environment variables"
                    .into(),
            )
        })?;

        let model = env::var("OPENAI_MODEL_NAME").unwrap_or_else(|_| DEFAULT_JUDGE_MODEL.into());
        Ok(Self::new(api_key, model))
    }

    /// Builds an agent from a secret file, if it holds a non-empty OpenAI key.
    pub fn from_secret_storage(storage: &SecretStorage) -> Option<Self> {
        let openai = storage.load().ok()?.openai?;
        if openai.api_key.trim().is_empty() {
            return None;
        }
        let model = openai
            .model_name
            .unwrap_or_else(|| DEFAULT_JUDGE_MODEL.into());
        Some(Self::new(openai.api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the agent at another OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the per-request HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, AgentError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| AgentError::ProcessError {
                status_code: None,
                message: format!("OpenAI API request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            AgentError::ExecutionFailed(format!("Failed to parse OpenAI response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[async_trait]
impl JudgeAgent for OpenAIJudgeAgent {
    fn name(&self) -> &str {
        "openai"
    }

    async fn execute(&self, request: JudgeRequest) -> Result<String, AgentError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };
        debug!(model = %self.model, max_tokens = body.max_tokens, temperature = body.temperature, "calling OpenAI");

        self.send_request(&body).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, AgentError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| {
            AgentError::ExecutionFailed("OpenAI API returned no content in the response".into())
        })
}

fn map_http_error(status: StatusCode, body: String) -> AgentError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    AgentError::ProcessError {
        status_code: Some(status.as_u16()),
        message: format!("OpenAI API returned {status}: {message}"),
        is_retryable,
    }
}
