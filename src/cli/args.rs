use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// 输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// 终端通知样式
    #[default]
    Text,
    /// JSON 格式的审查结果
    Json,
}

#[derive(Parser, Debug, Default)]
#[command(
    name = "code-reviewer",
    version,
    about = "AI 代码审查工具 - 使用 LLM 审查 Python 代码并给出修复版本",
    long_about = "code-reviewer 将 Python 代码发送到 OpenAI 兼容的对话补全接口，列出潜在问题并给出修复后的代码。代码可以通过文件或标准输入提供。"
)]
pub struct Args {
    /// 待审查的代码文件（省略或为 - 时从标准输入读取）
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// OpenAI API key（也可以通过 CODE_REVIEWER_API_KEY 设置）
    #[arg(short = 'k', long = "api-key", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Model to use (default: gpt-4)
    #[arg(short, long, default_value = "")] // 空字符串表示未指定
    pub model: String,

    /// Chat completion endpoint
    #[arg(long = "api-url", default_value = "")] // 空字符串表示未指定
    pub api_url: String,

    /// 请求超时（秒）
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// 指定配置文件路径
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// 审查完成后"复制"修复后的代码
    #[arg(long, default_value_t = false)]
    pub copy: bool,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// 输出调试日志
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,

    /// 日志写入指定文件而不是标准错误
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl Args {
    /// 是否从标准输入读取代码
    pub fn reads_stdin(&self) -> bool {
        match &self.file {
            None => true,
            Some(path) => path.as_os_str() == "-",
        }
    }
}
