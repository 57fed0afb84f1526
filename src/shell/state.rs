use std::collections::HashMap;

/// 存放"已复制"代码的会话键
pub const CLIPBOARD_KEY: &str = "clipboard";

/// 界面会话状态
///
/// 只在一次会话内有效，不做持久化。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    values: HashMap<String, String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// 是否已经"复制"过修复后的代码
    pub fn is_copied(&self) -> bool {
        self.values.contains_key(CLIPBOARD_KEY)
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.get(CLIPBOARD_KEY)
    }
}
