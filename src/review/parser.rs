//! 模型回复解析
//!
//! 回复按两个字面标记切分：`ISSUES:` 之后是以 `-` 分隔的问题列表，
//! `FIXED_CODE:` 之后是修复后的代码。任一标记缺失时返回空结果。

/// 问题列表的起始标记
pub const ISSUES_MARKER: &str = "ISSUES:";

/// 修复代码的起始标记
pub const FIXED_CODE_MARKER: &str = "FIXED_CODE:";

/// 解析后的审查内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReview {
    pub issues: Vec<String>,
    pub fixed_code: String,
}

/// 回复中是否同时包含两个标记
pub fn contains_markers(response_text: &str) -> bool {
    response_text.contains(ISSUES_MARKER) && response_text.contains(FIXED_CODE_MARKER)
}

/// 解析模型回复
pub fn parse_review_response(response_text: &str) -> ParsedReview {
    if !contains_markers(response_text) {
        return ParsedReview::default();
    }

    let issues_section = section_after(response_text, ISSUES_MARKER);
    let issues_text = issues_section
        .split(FIXED_CODE_MARKER)
        .next()
        .unwrap_or_default();
    let fixed_code = section_after(response_text, FIXED_CODE_MARKER).trim();

    ParsedReview {
        issues: split_issues(issues_text),
        fixed_code: fixed_code.to_string(),
    }
}

/// 第一个 `marker` 之后、下一个 `marker` 之前的文本
fn section_after<'a>(text: &'a str, marker: &str) -> &'a str {
    text.split(marker).nth(1).unwrap_or_default()
}

fn split_issues(issues_text: &str) -> Vec<String> {
    issues_text
        .split('-')
        .map(str::trim)
        .filter(|issue| !issue.is_empty())
        .map(String::from)
        .collect()
}
