use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::ai::provider::{
    ProviderConfig, DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};

/// 默认配置文件名（当前目录）
pub const CONFIG_FILE_NAME: &str = "code-reviewer.toml";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("invalid API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// 配置文件结构，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_key: Option<String>,
    api_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
    debug: Option<bool>,
    log_file: Option<String>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub debug: bool,
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            debug: false,
            log_file: None,
        }
    }
}

// API key 不允许出现在日志中
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("debug", &self.debug)
            .field("log_file", &self.log_file)
            .finish()
    }
}

impl Config {
    /// 按层加载配置：默认值 → 配置文件 → .env 与环境变量
    ///
    /// 命令行参数由调用方通过 `update_from_args` 最后覆盖。
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        match explicit_path {
            Some(path) => config.load_from_file(path)?,
            None => {
                if let Some(path) = Self::discover_config_file() {
                    config.load_from_file(&path)?;
                }
            }
        }

        config.load_from_env_file();
        config.load_from_env()?;

        Ok(config)
    }

    /// 查找默认位置的配置文件：当前目录优先，其次 ~/.code-reviewer/config.toml
    fn discover_config_file() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Some(local);
        }

        let home = env::var("HOME").ok()?;
        let user_path = PathBuf::from(home).join(".code-reviewer").join("config.toml");
        user_path.is_file().then_some(user_path)
    }

    pub fn load_from_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded config file");

        if let Some(api_key) = file.api_key {
            self.api_key = Some(api_key);
        }
        if let Some(api_url) = file.api_url {
            self.api_url = api_url;
        }
        if let Some(model) = file.model {
            self.model = model;
        }
        if let Some(timeout_secs) = file.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if let Some(debug) = file.debug {
            self.debug = debug;
        }
        if let Some(log_file) = file.log_file {
            self.log_file = Some(log_file);
        }
        Ok(())
    }

    pub fn load_from_env_file(&mut self) {
        // 尝试从用户主目录加载
        if let Ok(home) = env::var("HOME") {
            let user_env_path = PathBuf::from(home).join(".code-reviewer").join(".env");
            if user_env_path.exists() {
                dotenvy::from_path(user_env_path).ok();
            }
        }

        // 尝试从当前目录加载
        dotenvy::dotenv().ok();
    }

    pub fn load_from_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(api_key) = env::var("CODE_REVIEWER_API_KEY") {
            self.api_key = Some(api_key);
        }
        if let Ok(url) = env::var("CODE_REVIEWER_API_URL") {
            self.api_url = url;
        }
        if let Ok(model) = env::var("CODE_REVIEWER_MODEL") {
            self.model = model;
        }
        if let Ok(timeout) = env::var("CODE_REVIEWER_TIMEOUT") {
            self.timeout_secs = timeout.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "CODE_REVIEWER_TIMEOUT".to_string(),
                value: timeout.clone(),
            })?;
        }
        if let Ok(debug) = env::var("CODE_REVIEWER_DEBUG") {
            self.debug = parse_bool(&debug).ok_or(ConfigError::InvalidValue {
                key: "CODE_REVIEWER_DEBUG".to_string(),
                value: debug.clone(),
            })?;
        }
        if let Ok(log_file) = env::var("CODE_REVIEWER_LOG_FILE") {
            self.log_file = Some(log_file);
        }
        Ok(())
    }

    pub fn update_from_args(&mut self, args: &crate::cli::args::Args) {
        // 命令行参数优先级最高
        if let Some(api_key) = &args.api_key {
            self.api_key = Some(api_key.clone());
        }
        if !args.api_url.is_empty() {
            self.api_url = args.api_url.clone();
        }
        if !args.model.is_empty() {
            self.model = args.model.clone();
        }
        if let Some(timeout) = args.timeout {
            self.timeout_secs = timeout;
        }
        if args.debug {
            self.debug = true;
        }
        if let Some(log_file) = &args.log_file {
            self.log_file = Some(log_file.clone());
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.api_url).map_err(|err| ConfigError::InvalidUrl {
            url: self.api_url.clone(),
            reason: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: self.api_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "model".to_string(),
                value: self.model.clone(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// 生成提供商配置，凭据由每次提交单独附加
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            model: self.model.clone(),
            api_key: None,
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout_secs,
            ..ProviderConfig::default()
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
