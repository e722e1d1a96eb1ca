use crate::config::LocaleConfig;
use crate::input::{optional_u64, require_dir, require_str};
use crate::mcp::ToolContext;
use crate::tools::{ToolError, ToolResult, render, success_result};
use chrono::Datelike;
use regex::{Regex, RegexBuilder};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub fn call(context: &ToolContext, args: &Value) -> Value {
    render(rename(&context.config.locale, args))
}

fn rename(locale: &LocaleConfig, args: &Value) -> ToolResult {
    let folder_path = require_str(args, "folder_path")?;
    let folder = require_dir(folder_path)?;

    let month = match optional_u64(args, "month")? {
        Some(month) => u32::try_from(month)
            .ok()
            .filter(|month| (1..=12).contains(month))
            .ok_or_else(|| ToolError::invalid_input("month must be between 1 and 12"))?,
        None => chrono::Local::now().month(),
    };
    let target = locale
        .target_month(month)
        .ok_or_else(|| ToolError::internal(format!("no target name for month {month}")))?;

    let pattern = month_pattern(&locale.month_names)?;
    let results = rename_files(folder, &pattern, target)?;
    info!(folder_path, target, files = results.len(), "renamed files by month");

    let summary = results
        .iter()
        .filter_map(|entry| {
            entry
                .get("message")
                .or_else(|| entry.get("error"))
                .and_then(|v| v.as_str())
        })
        .collect::<Vec<_>>();
    let text = if summary.is_empty() {
        "No file names contain a month.".to_string()
    } else {
        summary.join("\n")
    };

    Ok(success_result(
        text,
        json!({
            "month": target,
            "results": results
        }),
    ))
}

/// Case-insensitive alternation over the month names, longest first so that
/// `mayo` is not read as `may` followed by `o`.
fn month_pattern(names: &[String]) -> Result<Regex, ToolError> {
    let mut names: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|name| !name.is_empty())
        .collect();
    names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    names.dedup();

    let alternation = names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&format!("(?:{alternation})"))
        .case_insensitive(true)
        .build()
        .map_err(|err| ToolError::internal(format!("invalid month names: {err}")))
}

fn rename_files(folder: &Path, pattern: &Regex, target: &str) -> Result<Vec<Value>, ToolError> {
    let entries = fs::read_dir(folder).map_err(|err| {
        ToolError::internal(err.to_string()).with_source(folder.to_string_lossy())
    })?;

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();

    let mut results = Vec::new();
    for name in names {
        if !pattern.is_match(&name) {
            debug!(file = %name, "no month in file name");
            continue;
        }
        let renamed = pattern.replacen(&name, 1, regex::NoExpand(target)).into_owned();
        results.push(rename_one(folder, &name, &renamed));
    }
    Ok(results)
}

fn rename_one(folder: &Path, name: &str, renamed: &str) -> Value {
    if renamed == name {
        return json!({
            "file": name,
            "renamed_to": renamed,
            "message": format!("'{name}' already carries the month.")
        });
    }

    let destination = folder.join(renamed);
    if destination.exists() {
        warn!(file = name, renamed, "rename destination exists");
        return json!({
            "file": name,
            "error": format!("Error renaming '{name}': '{renamed}' already exists.")
        });
    }

    match fs::rename(folder.join(name), &destination) {
        Ok(()) => json!({
            "file": name,
            "renamed_to": renamed,
            "message": format!("Renamed '{name}' to '{renamed}'.")
        }),
        Err(err) => {
            warn!(file = name, error = %err, "rename failed");
            json!({
                "file": name,
                "error": format!("Error renaming '{name}': {err}")
            })
        }
    }
}
