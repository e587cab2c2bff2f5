use std::sync::Arc;
use std::time::Duration;

use recipe_core::config::JudgeConfig;
use recipe_core::judgment::{AgentError, JudgeAgent, JudgeRequest, JudgmentClient, JudgmentResult};
use recipe_infrastructure::storage::SecretStorage;
use recipe_interaction::OpenAIJudgeAgent;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

fn agent(server: &MockServer) -> OpenAIJudgeAgent {
    OpenAIJudgeAgent::new("test-key", "gpt-3.5-turbo").with_base_url(server.uri())
}

fn request(prompt: &str) -> JudgeRequest {
    JudgeRequest {
        prompt: prompt.to_string(),
        max_tokens: 150,
        temperature: 0.7,
    }
}

#[tokio::test]
async fn test_execute_sends_prompt_and_sampling_bounds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 150,
            "messages": [{ "role": "user", "content": "judge this" }]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("Answer: Yes\nExplanation: Caprese.")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = agent(&server).execute(request("judge this")).await.unwrap();
    assert_eq!(reply, "Answer: Yes\nExplanation: Caprese.");
}

#[tokio::test]
async fn test_rate_limit_is_retryable_process_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit reached", "type": "requests" }
        })))
        .mount(&server)
        .await;

    let err = agent(&server).execute(request("x")).await.unwrap_err();
    match err {
        AgentError::ProcessError {
            status_code,
            message,
            is_retryable,
        } => {
            assert_eq!(status_code, Some(429));
            assert!(message.contains("Rate limit reached"));
            assert!(is_retryable);
        }
        other => panic!("Expected ProcessError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_execution_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = agent(&server).execute(request("x")).await.unwrap_err();
    assert!(matches!(err, AgentError::ExecutionFailed(_)));
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("Answer: Yes\nExplanation: late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = agent(&server)
        .with_timeout(Duration::from_millis(100))
        .execute(request("x"))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unreachable_endpoint_becomes_transport_error() {
    // Nothing listens on port 9 (discard) in test environments
    let agent = OpenAIJudgeAgent::new("test-key", "gpt-3.5-turbo")
        .with_base_url("http://127.0.0.1:9")
        .with_timeout(Duration::from_secs(2));
    let client = JudgmentClient::new(Arc::new(agent), &JudgeConfig::default()).unwrap();

    let result = client.judge("tomato", &["basil".to_string()]).await;
    assert!(matches!(result, JudgmentResult::TransportError(_)));
}

#[tokio::test]
async fn test_judgment_client_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("Answer: No\nExplanation: Banana and miso clash.")),
        )
        .mount(&server)
        .await;

    let client = JudgmentClient::new(Arc::new(agent(&server)), &JudgeConfig::default()).unwrap();
    let result = client
        .judge("banana", &["miso".to_string(), "sardine".to_string()])
        .await;

    assert_eq!(
        result,
        JudgmentResult::NotViable("Banana and miso clash.".to_string())
    );
}

#[test]
fn test_agent_from_secret_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("secret.json");
    std::fs::write(
        &file_path,
        r#"{ "openai": { "api_key": "sk-from-file", "model_name": "gpt-4o-mini" } }"#,
    )
    .unwrap();

    let agent = OpenAIJudgeAgent::from_secret_storage(&SecretStorage::with_path(file_path)).unwrap();
    assert_eq!(agent.model(), "gpt-4o-mini");
}

#[test]
fn test_blank_key_in_secret_file_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("secret.json");
    std::fs::write(&file_path, r#"{ "openai": { "api_key": "" } }"#).unwrap();

    assert!(OpenAIJudgeAgent::from_secret_storage(&SecretStorage::with_path(file_path)).is_none());
}
