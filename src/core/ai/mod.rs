pub mod error;
pub mod http;
pub mod prompt;
pub mod provider;
pub mod providers;

pub use error::ProviderError;
pub use prompt::{PromptBuilder, PromptTemplate, REVIEW_SYSTEM_PROMPT};
pub use provider::{
    CompletionProvider, OpenAIProviderFactory, ProviderConfig, ProviderFactory,
};
