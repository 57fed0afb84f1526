use async_trait::async_trait;
use std::fmt;

use super::error::ProviderError;
use super::providers::OpenAICompatibleProvider;

/// 默认对话补全接口地址
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// 默认模型
pub const DEFAULT_MODEL: &str = "gpt-4";

/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// AI 提供商配置
///
/// 每次提交都显式构造并传入，凭据不会写入任何全局状态。
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub provider_name: String,
    pub model: String,
    pub api_key: Option<String>,
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_name: String::from("OpenAI"),
            model: String::from(DEFAULT_MODEL),
            api_key: None,
            api_url: String::from(DEFAULT_API_URL),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ProviderConfig {
    /// 使用给定凭据生成一份新配置
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

// API key 不允许出现在日志中
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider_name", &self.provider_name)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// 对话补全提供商接口
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// 发送一次对话补全请求，返回第一个候选回复的文本
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, ProviderError>;
}

/// AI 提供商工厂
///
/// 界面层每次提交时用它根据当次的凭据创建提供商。
pub trait ProviderFactory: Send + Sync {
    fn create(&self, config: ProviderConfig) -> Result<Box<dyn CompletionProvider>, ProviderError>;
}

/// OpenAI 兼容接口的默认工厂
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAIProviderFactory;

impl ProviderFactory for OpenAIProviderFactory {
    fn create(&self, config: ProviderConfig) -> Result<Box<dyn CompletionProvider>, ProviderError> {
        Ok(Box::new(OpenAICompatibleProvider::new(config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_default() {
        let config = ProviderConfig::default();
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_secs, 60);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ProviderConfig::default().with_api_key("sk-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_factory_creates_provider() {
        let config = ProviderConfig::default().with_api_key("sk-test");
        assert!(OpenAIProviderFactory.create(config).is_ok());
    }
}
