/// E2E 测试：OpenAI 兼容提供商
/// 使用 wiremock 模拟对话补全接口，验证请求内容和各类错误的折叠
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use code_reviewer::core::ai::providers::OpenAICompatibleProvider;
use code_reviewer::core::ai::{CompletionProvider, ProviderConfig, ProviderError};
use code_reviewer::review::{review_code, ReviewResult};

fn test_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        api_url: format!("{}/v1/chat/completions", server.uri()),
        timeout_secs: 5,
        ..ProviderConfig::default()
    }
    .with_api_key("sk-test")
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_request_carries_fixed_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4",
            "temperature": 0.7,
            "max_tokens": 2000,
            "stream": false,
            "messages": [
                {
                    "role": "system",
                    "content": "You are an expert Python code reviewer. Provide detailed, actionable feedback."
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "ISSUES:\n- Missing docstring\nFIXED_CODE:\ndef f():\n    \"\"\"Doc.\"\"\"",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let result = review_code("def f(): pass", test_config(&server)).await;
    assert_eq!(
        result,
        ReviewResult::Success {
            issues: vec!["Missing docstring".to_string()],
            fixed_code: "def f():\n    \"\"\"Doc.\"\"\"".to_string(),
        }
    );
}

#[tokio::test]
async fn test_user_prompt_contains_submitted_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .mount(&server)
        .await;

    review_code("print('hello')", test_config(&server)).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let user_prompt = body["messages"][1]["content"].as_str().unwrap();
    assert_eq!(body["messages"][1]["role"], "user");
    assert!(user_prompt.contains("```python\nprint('hello')\n```"));
}

#[tokio::test]
async fn test_unauthorized_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Incorrect API key provided"))
        .mount(&server)
        .await;

    let provider = OpenAICompatibleProvider::new(test_config(&server)).unwrap();
    let err = provider.complete("s", "u", 0.7, 2000).await.unwrap_err();
    assert!(matches!(err, ProviderError::Auth { status: 401, .. }));

    let result = review_code("x = 1", test_config(&server)).await;
    assert_eq!(
        result.error_message(),
        Some("OpenAI authentication failed: 401 - Incorrect API key provided")
    );
}

#[tokio::test]
async fn test_server_error_becomes_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    // 不重试：只发送一次请求
    let result = review_code("x = 1", test_config(&server)).await;
    assert_eq!(
        result.error_message(),
        Some("OpenAI request failed: 500 - upstream exploded")
    );
}

#[tokio::test]
async fn test_rate_limit_becomes_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit reached"))
        .expect(1)
        .mount(&server)
        .await;

    let result = review_code("x = 1", test_config(&server)).await;
    assert!(!result.is_success());
    assert!(result.error_message().unwrap().contains("429"));
}

#[tokio::test]
async fn test_malformed_body_is_unexpected_format() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let provider = OpenAICompatibleProvider::new(test_config(&server)).unwrap();
    let err = provider.complete("s", "u", 0.7, 2000).await.unwrap_err();
    assert!(matches!(err, ProviderError::UnexpectedFormat(_)));
}

#[tokio::test]
async fn test_empty_choices_becomes_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let result = review_code("x = 1", test_config(&server)).await;
    assert_eq!(
        result.error_message(),
        Some("unexpected response format: response contained no choices")
    );
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ProviderConfig {
        timeout_secs: 1,
        ..test_config(&server)
    };
    let provider = OpenAICompatibleProvider::new(config).unwrap();
    let err = provider.complete("s", "u", 0.7, 2000).await.unwrap_err();
    assert!(matches!(err, ProviderError::Network(_)));
}

#[tokio::test]
async fn test_connection_refused_becomes_failure() {
    let config = ProviderConfig {
        api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
        timeout_secs: 5,
        ..ProviderConfig::default()
    }
    .with_api_key("sk-test");

    let result = review_code("x = 1", config).await;
    let message = result.error_message().unwrap();
    assert!(message.starts_with("network error:"));
}

#[tokio::test]
async fn test_missing_markers_is_empty_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("The code looks fine, no changes needed.")),
        )
        .mount(&server)
        .await;

    let result = review_code("x = 1", test_config(&server)).await;
    assert_eq!(result, ReviewResult::empty());
}
