//! 终端渲染
//!
//! 所有输出都写入调用方提供的 `Write`，便于测试。

use std::fmt::Display;
use std::io::{self, Write};

use crate::review::ReviewResult;
use crate::shell::SubmitOutcome;

pub const PAGE_TITLE: &str = "🔍 AI Code Reviewer";
pub const PAGE_SUBTITLE: &str = "Submit your Python code for AI-powered review and suggestions.";
pub const SPINNER_TEXT: &str = "Reviewing your code...";
pub const COPY_CONFIRMATION: &str = "Code copied to clipboard!";
pub const FOOTER_TEXT: &str = "Built with Rust and OpenAI GPT-4";

const HOW_TO_USE: [&str; 5] = [
    "Provide your OpenAI API key (--api-key or CODE_REVIEWER_API_KEY)",
    "Pass a Python file, or pipe your code through stdin",
    "Run code-reviewer to get feedback",
    "Review the suggestions and improved code",
    "Use --copy to keep the improved code in the session",
];

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Error,
    Warning,
}

impl NotificationLevel {
    fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Error => "❌",
            NotificationLevel::Warning => "⚠️ ",
        }
    }
}

pub fn render_notification<W: Write>(
    out: &mut W,
    level: NotificationLevel,
    message: impl Display,
) -> io::Result<()> {
    writeln!(out, "{} {}", level.icon(), message)
}

pub fn render_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", PAGE_TITLE)?;
    writeln!(out, "{}", PAGE_SUBTITLE)?;
    writeln!(out)
}

pub fn render_spinner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "⏳ {}", SPINNER_TEXT)?;
    out.flush()
}

/// 渲染一次提交的结果，跳过的提交不产生任何输出
pub fn render_outcome<W: Write>(out: &mut W, outcome: &SubmitOutcome) -> io::Result<()> {
    match outcome {
        SubmitOutcome::Skipped => Ok(()),
        SubmitOutcome::Reviewed(result) => render_result(out, result),
    }
}

pub fn render_result<W: Write>(out: &mut W, result: &ReviewResult) -> io::Result<()> {
    if let Some(message) = result.error_message() {
        return render_notification(
            out,
            NotificationLevel::Error,
            format_args!("Error during code review: {}", message),
        );
    }

    let issues = result.issues();
    if !issues.is_empty() {
        writeln!(out, "📋 Review Comments")?;
        for issue in issues {
            render_notification(out, NotificationLevel::Warning, issue)?;
        }
        writeln!(out)?;
    }

    if let Some(fixed_code) = result.fixed_code() {
        writeln!(out, "✨ Improved Code")?;
        render_code_block(out, fixed_code, "python")?;
    }

    Ok(())
}

pub fn render_code_block<W: Write>(out: &mut W, code: &str, language: &str) -> io::Result<()> {
    writeln!(out, "```{}", language)?;
    writeln!(out, "{}", code)?;
    writeln!(out, "```")
}

/// 界面层自身的错误（读取输入失败等）
pub fn render_shell_error<W: Write>(out: &mut W, err: impl Display) -> io::Result<()> {
    render_notification(
        out,
        NotificationLevel::Error,
        format_args!("An error occurred: {}", err),
    )
}

pub fn render_copy_confirmation<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", COPY_CONFIRMATION)
}

pub fn render_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "📖 How to Use")?;
    for (index, step) in HOW_TO_USE.iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, step)?;
    }
    Ok(())
}

pub fn render_footer<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "---")?;
    writeln!(out, "{}", FOOTER_TEXT)
}
