use crate::input::require_str;
use crate::mcp::ToolContext;
use crate::tools::{ToolError, ToolResult, render, success_result};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

pub fn call(_context: &ToolContext, args: &Value) -> Value {
    render(duplicate(args))
}

fn duplicate(args: &Value) -> ToolResult {
    let source_path = require_str(args, "source_path")?;
    let dest_path = require_str(args, "dest_path")?;
    let source = Path::new(source_path);
    let dest = Path::new(dest_path);

    if !source.is_dir() {
        return Err(
            ToolError::not_found(format!("Source folder '{source_path}' does not exist."))
                .with_source(source_path),
        );
    }
    if dest.exists() {
        return Err(ToolError::already_exists(format!(
            "Destination folder '{dest_path}' already exists."
        ))
        .with_source(dest_path));
    }

    let files_copied = copy_tree(source, dest)?;
    info!(source_path, dest_path, files_copied, "folder duplicated");

    let message = format!("Folder duplicated from '{source_path}' to '{dest_path}'.");
    Ok(success_result(
        message.clone(),
        json!({
            "message": message,
            "source_path": source_path,
            "dest_path": dest_path,
            "files_copied": files_copied
        }),
    ))
}

/// Copy `source` to the not yet existing `dest`, following symlinks.
fn copy_tree(source: &Path, dest: &Path) -> Result<usize, ToolError> {
    let mut files_copied = 0;
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(|err| ToolError::internal(err.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|err| ToolError::internal(err.to_string()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|err| copy_error(&target, err))?;
        } else {
            debug!(from = %entry.path().display(), to = %target.display(), "copying file");
            fs::copy(entry.path(), &target).map_err(|err| copy_error(&target, err))?;
            files_copied += 1;
        }
    }
    Ok(files_copied)
}

fn copy_error(target: &Path, err: std::io::Error) -> ToolError {
    ToolError::internal(err.to_string()).with_source(target.to_string_lossy())
}
