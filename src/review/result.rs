use serde::{Deserialize, Serialize};

/// 审查请求
///
/// 代码不做任何校验，空字符串或非 Python 代码都会原样发送。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub code: String,
}

impl ReviewRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// 审查结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReviewResult {
    Success {
        issues: Vec<String>,
        fixed_code: String,
    },
    Failure {
        message: String,
    },
}

impl ReviewResult {
    /// 没有任何问题和修复代码的成功结果
    pub fn empty() -> Self {
        ReviewResult::Success {
            issues: Vec::new(),
            fixed_code: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ReviewResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ReviewResult::Success { .. })
    }

    pub fn issues(&self) -> &[String] {
        match self {
            ReviewResult::Success { issues, .. } => issues,
            ReviewResult::Failure { .. } => &[],
        }
    }

    /// 修复后的代码，失败或为空时返回 None
    pub fn fixed_code(&self) -> Option<&str> {
        match self {
            ReviewResult::Success { fixed_code, .. } if !fixed_code.is_empty() => {
                Some(fixed_code)
            }
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ReviewResult::Failure { message } => Some(message),
            ReviewResult::Success { .. } => None,
        }
    }
}
