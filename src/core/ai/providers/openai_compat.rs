use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ai::error::ProviderError;
use crate::core::ai::http::build_client;
use crate::core::ai::provider::{CompletionProvider, ProviderConfig};

/// OpenAI 兼容 Chat Completion 请求
#[derive(Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub stream: bool,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Chat 消息
#[derive(Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// OpenAI 兼容 Chat Completion 响应
#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

/// 响应选择
#[derive(Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatMessageResponse>,
}

/// 非流式完整消息响应
#[derive(Deserialize)]
pub struct ChatMessageResponse {
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// 取第一个候选回复的文本内容
    pub fn into_first_content(self) -> Result<String, ProviderError> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            ProviderError::UnexpectedFormat("response contained no choices".to_string())
        })?;

        choice
            .message
            .and_then(|m| m.content)
            .ok_or_else(|| {
                ProviderError::UnexpectedFormat("first choice has no message content".to_string())
            })
    }
}

/// OpenAI 兼容提供商
///
/// 每个实例持有自己的配置（包括凭据），不同提交之间互不干扰。
pub struct OpenAICompatibleProvider {
    client: Client,
    config: ProviderConfig,
}

impl OpenAICompatibleProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = build_client(config.timeout_secs)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// 发送 Chat Completion 请求
    async fn send_chat_request(
        &self,
        request: &ChatCompletionRequest<'_>,
    ) -> Result<reqwest::Response, ProviderError> {
        let provider_name = &self.config.provider_name;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProviderError::MissingApiKey {
                provider: provider_name.clone(),
            })?;

        debug!(
            provider = %provider_name,
            model = request.model,
            url = %self.config.api_url,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::Auth {
                provider: provider_name.clone(),
                status: status.as_u16(),
                body,
            }),
            _ => Err(ProviderError::Provider {
                provider: provider_name.clone(),
                status: status.as_u16(),
                body,
            }),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAICompatibleProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, ProviderError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            stream: false,
            temperature,
            max_tokens,
        };

        let response = self.send_chat_request(&request).await?;
        let chat_response: ChatCompletionResponse = response.json().await?;
        chat_response.into_first_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatCompletionRequest {
            model: "gpt-4",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a reviewer",
                },
                ChatMessage {
                    role: "user",
                    content: "print(1)",
                },
            ],
            stream: false,
            temperature: 0.7,
            max_tokens: 2000,
        };

        let json: serde_json::Value = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "print(1)");
        assert_eq!(json["max_tokens"], 2000);
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_first_content_extraction() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"first"}},{"message":{"content":"second"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_first_content().unwrap(), "first");
    }

    #[test]
    fn test_empty_choices_is_unexpected_format() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        let err = response.into_first_content().unwrap_err();
        assert!(matches!(err, ProviderError::UnexpectedFormat(_)));
    }

    #[test]
    fn test_null_content_is_unexpected_format() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(response.into_first_content().is_err());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_request() {
        let config = ProviderConfig {
            api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            ..ProviderConfig::default()
        };
        let provider = OpenAICompatibleProvider::new(config).unwrap();
        let err = provider.complete("s", "u", 0.7, 10).await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey { .. }));
    }
}
