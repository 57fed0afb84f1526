use std::io;
use std::sync::Mutex;

use tracing::{Level, Subscriber};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
    pub format: LogFormat,
    pub output: LogOutput,
    pub include_file_location: bool,
    pub include_span_events: bool,
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Compact,
            output: LogOutput::Stderr,
            include_file_location: false,
            include_span_events: false,
            filter: None,
        }
    }
}

impl LoggingConfig {
    /// 根据调试开关和日志文件生成配置
    pub fn for_cli(debug: bool, log_file: Option<&str>) -> Self {
        let mut config = Self::default();
        if debug {
            config.level = Level::DEBUG;
            config.format = LogFormat::Pretty;
            config.include_file_location = true;
        }
        if let Some(path) = log_file {
            config.output = LogOutput::File(path.to_string());
        }
        config
    }
}

/// 日志格式
#[derive(Debug, Clone)]
pub enum LogFormat {
    /// 人类可读的格式
    Pretty,
    /// 紧凑格式
    Compact,
}

/// 日志输出目标
///
/// 标准输出留给审查结果，日志只写标准错误或文件。
#[derive(Debug, Clone)]
pub enum LogOutput {
    Stderr,
    File(String),
}

/// 构建过滤器：显式 filter 优先，否则使用 RUST_LOG 并附加本 crate 的级别
pub fn build_env_filter(config: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    let filter = match &config.filter {
        Some(filter) => EnvFilter::try_new(filter)?,
        None => EnvFilter::from_default_env()
            .add_directive(format!("code_reviewer={}", config.level).parse()?),
    };
    Ok(filter)
}

/// 设置日志系统
pub fn setup_logging(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = build_env_filter(&config)?;

    match &config.output {
        LogOutput::Stderr => {
            let fmt_layer = create_fmt_layer(&config, io::stderr);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogOutput::File(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let fmt_layer = create_fmt_layer(&config, Mutex::new(file));
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}

fn create_fmt_layer<S, W>(config: &LoggingConfig, make_writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span> + 'static,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let ansi = matches!(config.output, LogOutput::Stderr);
    let mut layer = fmt::layer()
        .with_writer(make_writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true);

    if config.include_file_location {
        layer = layer.with_file(true).with_line_number(true);
    }

    if config.include_span_events {
        layer = layer.with_span_events(FmtSpan::CLOSE);
    }

    match config.format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}
