use crate::input::{require_dir, require_str};
use crate::mcp::ToolContext;
use crate::tools::{ToolError, ToolResult, render, success_result};
use serde_json::{Map, Value, json};
use std::any::Any;
use std::fs;
use std::panic;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn call(_context: &ToolContext, args: &Value) -> Value {
    render(extract(args))
}

fn extract(args: &Value) -> ToolResult {
    let folder_path = require_str(args, "folder_path")?;
    let folder = require_dir(folder_path)?;

    let pdfs = pdf_files(folder)?;
    if pdfs.is_empty() {
        return Err(ToolError::not_found("No PDF files found in the folder.").with_source(folder_path));
    }

    let mut files = Map::new();
    for (name, path) in &pdfs {
        let text = match extract_one(path) {
            Ok(text) => text,
            Err(message) => {
                warn!(file = %name, error = %message, "pdf extraction failed");
                format!("Error extracting text: {message}")
            }
        };
        files.insert(name.clone(), Value::String(text));
    }
    info!(folder_path, count = files.len(), "extracted pdf text");

    let count = files.len();
    Ok(success_result(
        format!("Extracted text from {count} PDF file(s) in '{folder_path}'."),
        json!({
            "files": files,
            "count": count
        }),
    ))
}

/// Regular `*.pdf` files directly inside `folder`, sorted by name.
fn pdf_files(folder: &Path) -> Result<Vec<(String, PathBuf)>, ToolError> {
    let entries = fs::read_dir(folder).map_err(|err| {
        ToolError::internal(err.to_string()).with_source(folder.to_string_lossy())
    })?;

    let mut files: Vec<(String, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            let path = entry.path();
            (name.to_ascii_lowercase().ends_with(".pdf") && path.is_file()).then_some((name, path))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn extract_one(path: &Path) -> Result<String, String> {
    match panic::catch_unwind(|| pdf_extract::extract_text(path)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "PDF library panicked".to_string()
    }
}
