use crate::mcp::contracts::MAX_INPUT_BYTES;
use crate::tools::ToolError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Word-processor formats accepted by the template filler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Docx,
    Doc,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "docx" => Some(DocumentFormat::Docx),
            "doc" => Some(DocumentFormat::Doc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Docx => "docx",
            DocumentFormat::Doc => "doc",
        }
    }
}

pub fn arguments(args: &Value) -> Result<&Map<String, Value>, ToolError> {
    args.as_object()
        .ok_or_else(|| ToolError::invalid_input("arguments must be an object"))
}

/// A required, non-blank string argument.
pub fn require_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    let obj = arguments(args)?;
    let Some(value) = obj.get(key) else {
        return Err(ToolError::invalid_input(format!("{key} is required")));
    };
    let Some(value) = value.as_str() else {
        return Err(ToolError::invalid_input(format!("{key} must be a string")));
    };
    if value.trim().is_empty() {
        return Err(ToolError::invalid_input(format!("{key} must not be empty")));
    }
    Ok(value)
}

pub fn optional_u64(args: &Value, key: &str) -> Result<Option<u64>, ToolError> {
    let obj = arguments(args)?;
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or_else(|| ToolError::invalid_input(format!("{key} must be a non-negative integer"))),
    }
}

/// Check that `path` names an existing document of a supported format.
///
/// Only file metadata is inspected; the document itself is not opened.
pub fn require_document(path: &str) -> Result<DocumentFormat, ToolError> {
    let path_ref = Path::new(path);
    let metadata = match fs::metadata(path_ref) {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => {
            return Err(
                ToolError::not_found(format!("File '{path}' does not exist.")).with_source(path),
            );
        }
    };

    let Some(format) = DocumentFormat::from_path(path_ref) else {
        return Err(
            ToolError::unsupported_format("Only DOC or DOCX files are supported.")
                .with_source(path),
        );
    };

    let len = metadata.len();
    if len > MAX_INPUT_BYTES {
        return Err(ToolError::too_large(format!(
            "input exceeds limit: {len} bytes (max {MAX_INPUT_BYTES})"
        ))
        .with_source(path));
    }

    Ok(format)
}

pub fn require_dir(path: &str) -> Result<&Path, ToolError> {
    let path_ref = Path::new(path);
    if !path_ref.is_dir() {
        return Err(
            ToolError::not_found(format!("Folder '{path}' does not exist.")).with_source(path),
        );
    }
    Ok(path_ref)
}
