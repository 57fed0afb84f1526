use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// 审查请求的系统提示词
pub const REVIEW_SYSTEM_PROMPT: &str =
    "You are an expert Python code reviewer. Provide detailed, actionable feedback.";

static VARIABLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid template variable pattern"));

/// 提示词模板
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub template: String,
    pub variables: Vec<String>,
}

impl PromptTemplate {
    /// 创建新的模板
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        let template_str = template.into();
        let variables = Self::extract_variables(&template_str);

        Self {
            name: name.into(),
            template: template_str,
            variables,
        }
    }

    /// 从模板中提取变量（去重，保持出现顺序）
    fn extract_variables(template: &str) -> Vec<String> {
        let mut variables: Vec<String> = Vec::new();
        for cap in VARIABLE_PATTERN.captures_iter(template) {
            let name = cap[1].to_string();
            if !variables.contains(&name) {
                variables.push(name);
            }
        }
        variables
    }

    /// 渲染模板
    ///
    /// 单遍替换：代入的值原样插入，不会再被当作模板解析。
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String> {
        for var in &self.variables {
            if !values.contains_key(var) {
                anyhow::bail!("Missing variable: {}", var);
            }
        }

        let rendered = VARIABLE_PATTERN.replace_all(&self.template, |cap: &regex::Captures| {
            values.get(&cap[1]).cloned().unwrap_or_default()
        });
        Ok(rendered.into_owned())
    }
}

/// 提示词构建器
pub struct PromptBuilder {
    templates: HashMap<String, PromptTemplate>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        let mut builder = Self {
            templates: HashMap::new(),
        };

        builder.load_default_templates();
        builder
    }

    fn load_default_templates(&mut self) {
        let review_template =
            PromptTemplate::new("review", include_str!("../../../review-prompt.txt"));
        self.templates.insert("review".to_string(), review_template);
    }

    /// 构建代码审查提示词，代码原样插入
    pub fn build_review_prompt(&self, code: &str) -> Result<String> {
        let template = self
            .templates
            .get("review")
            .ok_or_else(|| anyhow::anyhow!("Review template not found"))?;

        let mut values = HashMap::new();
        values.insert("code".to_string(), code.to_string());

        template.render(&values)
    }
}
