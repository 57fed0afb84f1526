use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::core::ai::provider::{
    CompletionProvider, OpenAIProviderFactory, ProviderConfig, ProviderFactory,
};
use crate::core::ai::{PromptBuilder, REVIEW_SYSTEM_PROMPT};
use crate::review::parser::{contains_markers, parse_review_response};
use crate::review::result::{ReviewRequest, ReviewResult};

/// 审查请求的采样温度
pub const REVIEW_TEMPERATURE: f32 = 0.7;

/// 审查回复的最大 token 数
pub const REVIEW_MAX_TOKENS: u32 = 2000;

/// 代码审查器
///
/// 构建提示词、调用一次提供商、解析回复。提供商的任何错误都折叠为
/// `ReviewResult::Failure`，不重试。
pub struct CodeReviewer {
    provider: Arc<dyn CompletionProvider>,
    prompt_builder: PromptBuilder,
}

impl CodeReviewer {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            prompt_builder: PromptBuilder::new(),
        }
    }

    /// 审查一段代码
    pub async fn review(&self, request: &ReviewRequest) -> ReviewResult {
        let prompt = match self.prompt_builder.build_review_prompt(&request.code) {
            Ok(prompt) => prompt,
            Err(err) => return ReviewResult::failure(err.to_string()),
        };

        let start = Instant::now();
        let response_text = match self
            .provider
            .complete(
                REVIEW_SYSTEM_PROMPT,
                &prompt,
                REVIEW_TEMPERATURE,
                REVIEW_MAX_TOKENS,
            )
            .await
        {
            Ok(text) => text,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "Code review request failed");
                return ReviewResult::failure(err.to_string());
            }
        };

        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            response_len = response_text.len(),
            "Received review response"
        );

        if !contains_markers(&response_text) {
            warn!(
                response_len = response_text.len(),
                "Review response is missing ISSUES:/FIXED_CODE: markers, returning empty result"
            );
        }

        let parsed = parse_review_response(&response_text);
        info!(
            issues = parsed.issues.len(),
            has_fixed_code = !parsed.fixed_code.is_empty(),
            "Code review completed"
        );

        ReviewResult::Success {
            issues: parsed.issues,
            fixed_code: parsed.fixed_code,
        }
    }
}

/// 使用给定的提供商配置（含凭据）审查代码
pub async fn review_code(code: &str, config: ProviderConfig) -> ReviewResult {
    review_code_with(&OpenAIProviderFactory, code, config).await
}

/// 通过指定工厂创建提供商并审查代码
pub async fn review_code_with(
    factory: &dyn ProviderFactory,
    code: &str,
    config: ProviderConfig,
) -> ReviewResult {
    let provider = match factory.create(config) {
        Ok(provider) => provider,
        Err(err) => {
            warn!(kind = err.kind(), error = %err, "Failed to create completion provider");
            return ReviewResult::failure(err.to_string());
        }
    };

    CodeReviewer::new(Arc::from(provider))
        .review(&ReviewRequest::new(code))
        .await
}
