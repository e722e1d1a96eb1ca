use crate::mcp::errors;
use serde_json::{Value, json};
use std::fmt;

pub mod build_prompt;
pub mod duplicate_folder;
pub mod extract_pdf_text;
pub mod fetch_weather;
pub mod fill_template;
pub mod rename_by_month;

/// Failure of a single tool call, rendered as an `isError` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    pub kind: &'static str,
    pub message: String,
    pub source: Option<String>,
}

impl ToolError {
    pub fn new(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(errors::INVALID_INPUT, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(errors::NOT_FOUND, message)
    }

    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::new(errors::UNSUPPORTED_FORMAT, message)
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(errors::ALREADY_EXISTS, message)
    }

    pub fn external(error: impl fmt::Display) -> Self {
        Self::new(errors::EXTERNAL_LIBRARY, error.to_string())
    }

    pub fn too_large(message: impl Into<String>) -> Self {
        Self::new(errors::TOO_LARGE, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(errors::INTERNAL_ERROR, message)
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ToolError {}

pub type ToolResult = Result<Value, ToolError>;

/// Collapse a tool outcome into the MCP result envelope.
pub fn render(result: ToolResult) -> Value {
    match result {
        Ok(value) => value,
        Err(err) => error_result(err.kind, err.message, err.source.as_deref()),
    }
}

pub fn success_result(text: impl Into<String>, structured: Value) -> Value {
    json!({
        "content": [{"type": "text", "text": text.into()}],
        "structuredContent": structured,
        "isError": false
    })
}

pub fn error_result(
    kind: &'static str,
    message: impl Into<String>,
    source: Option<&str>,
) -> serde_json::Value {
    let message = message.into();
    let mut error = json!({
        "kind": kind,
        "message": message,
    });

    if let Some(source) = source
        && let Some(obj) = error.as_object_mut()
    {
        obj.insert("source".to_string(), json!(source));
    }

    json!({
        "content": [{"type": "text", "text": format!("Error: {message}")}],
        "structuredContent": {"error": error},
        "isError": true
    })
}
