//! 展示层
//!
//! 收集凭据和代码，按需调用审查器，并渲染结果。

pub mod render;
pub mod state;

use std::io::{self, Write};

use tracing::debug;

use crate::core::ai::provider::{ProviderConfig, ProviderFactory};
use crate::review::{review_code_with, ReviewResult};

pub use state::{SessionState, CLIPBOARD_KEY};

/// 一次提交的输入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub credential: String,
    pub code: String,
}

impl Submission {
    pub fn new(credential: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
            code: code.into(),
        }
    }

    /// 凭据和代码都非空时才允许提交
    pub fn is_ready(&self) -> bool {
        !self.credential.is_empty() && !self.code.is_empty()
    }
}

/// 界面状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellPhase {
    Idle,
    Loading,
}

/// 提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 输入不完整，未调用提供商
    Skipped,
    Reviewed(ReviewResult),
}

impl SubmitOutcome {
    pub fn result(&self) -> Option<&ReviewResult> {
        match self {
            SubmitOutcome::Skipped => None,
            SubmitOutcome::Reviewed(result) => Some(result),
        }
    }
}

/// 代码审查界面
pub struct ReviewShell<F> {
    factory: F,
    provider_config: ProviderConfig,
    session: SessionState,
    phase: ShellPhase,
}

impl<F: ProviderFactory> ReviewShell<F> {
    /// `provider_config` 中的凭据会被每次提交的凭据覆盖
    pub fn new(factory: F, provider_config: ProviderConfig) -> Self {
        Self {
            factory,
            provider_config,
            session: SessionState::new(),
            phase: ShellPhase::Idle,
        }
    }

    pub fn phase(&self) -> ShellPhase {
        self.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// 提交一次审查
    ///
    /// 加载提示写入 `status`；凭据或代码为空时直接返回 `Skipped`，不产生任何输出。
    pub async fn submit<W: Write>(
        &mut self,
        submission: &Submission,
        status: &mut W,
    ) -> io::Result<SubmitOutcome> {
        if !submission.is_ready() {
            debug!("Submission skipped: credential or code is empty");
            return Ok(SubmitOutcome::Skipped);
        }

        render::render_spinner(status)?;
        self.phase = ShellPhase::Loading;

        let config = self
            .provider_config
            .clone()
            .with_api_key(submission.credential.as_str());
        let result = review_code_with(&self.factory, &submission.code, config).await;

        self.phase = ShellPhase::Idle;
        Ok(SubmitOutcome::Reviewed(result))
    }

    /// "复制"修复后的代码：只记录到会话状态，没有真正的剪贴板
    pub fn copy_fixed_code(&mut self, result: &ReviewResult) -> bool {
        match result.fixed_code() {
            Some(fixed_code) => {
                self.session.set(CLIPBOARD_KEY, fixed_code);
                debug!(len = fixed_code.len(), "Improved code marked as copied");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_gating() {
        assert!(Submission::new("sk-test", "x = 1").is_ready());
        assert!(!Submission::new("", "x = 1").is_ready());
        assert!(!Submission::new("sk-test", "").is_ready());
        assert!(Submission::new("sk-test", "   ").is_ready());
    }

    #[test]
    fn test_outcome_result() {
        assert!(SubmitOutcome::Skipped.result().is_none());
        let outcome = SubmitOutcome::Reviewed(ReviewResult::empty());
        assert_eq!(outcome.result(), Some(&ReviewResult::empty()));
    }
}
