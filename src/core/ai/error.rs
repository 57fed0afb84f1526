use thiserror::Error;

/// 提供商调用错误
///
/// 内部按类型区分，便于日志记录；在审查边界上统一折叠为一条错误消息。
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} API key is required")]
    MissingApiKey { provider: String },

    #[error("{provider} authentication failed: {status} - {body}")]
    Auth {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} request failed: {status} - {body}")]
    Provider {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

impl ProviderError {
    /// 错误类别名称，用于结构化日志
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::MissingApiKey { .. } => "missing_api_key",
            ProviderError::Auth { .. } => "auth",
            ProviderError::Provider { .. } => "provider",
            ProviderError::Network(_) => "network",
            ProviderError::UnexpectedFormat(_) => "unexpected_format",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::UnexpectedFormat(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}
