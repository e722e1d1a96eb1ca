use crate::input::require_str;
use crate::mcp::ToolContext;
use crate::tools::{ToolError, ToolResult, render, success_result};
use regex::{Captures, Regex};
use serde_json::{Value, json};
use std::path::Path;

const PROMPT_TEMPLATE: &str = include_str!("report_prompt.txt");
const SLOT_PATTERN: &str = r"\{(folder_path|report_path|report_file)\}";

pub fn call(_context: &ToolContext, args: &Value) -> Value {
    render(build(args))
}

fn build(args: &Value) -> ToolResult {
    let report_path = require_str(args, "report_path")?;
    let folder_path = require_str(args, "folder_path")?;
    let report_file = Path::new(report_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            ToolError::invalid_input("report_path must name a file").with_source(report_path)
        })?;

    let prompt = render_prompt(folder_path, report_path, &report_file)?;
    Ok(success_result(prompt.clone(), json!({ "prompt": prompt })))
}

/// Fill the prompt slots in one pass so slot-like text inside paths stays literal.
fn render_prompt(
    folder_path: &str,
    report_path: &str,
    report_file: &str,
) -> Result<String, ToolError> {
    let slot = Regex::new(SLOT_PATTERN).map_err(|err| ToolError::internal(err.to_string()))?;
    let prompt = slot.replace_all(PROMPT_TEMPLATE, |caps: &Captures| match &caps[1] {
        "folder_path" => folder_path.to_string(),
        "report_path" => report_path.to_string(),
        _ => report_file.to_string(),
    });
    Ok(prompt.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::errors;

    fn prompt(result: &Value) -> &str {
        result
            .pointer("/structuredContent/prompt")
            .and_then(|v| v.as_str())
            .expect("prompt")
    }

    #[test]
    fn embeds_paths_and_file_name() {
        let result = call(
            &ToolContext::default(),
            &json!({
                "report_path": "/reports/INFORME MARZO 2025.docx",
                "folder_path": "/docs/marzo"
            }),
        );
        let text = prompt(&result);
        assert!(text.starts_with("***INSTRUCCIONES:***"));
        assert!(text.contains("En la carpeta \"/docs/marzo\""));
        assert!(text.contains("completar el archivo \"/reports/INFORME MARZO 2025.docx\""));
        assert!(text.contains("nombre del archivo \"INFORME MARZO 2025.docx\""));
        assert!(text.contains("{tipo de documento: Memorando, Oficio, Correo}"));
        assert!(!text.contains("{folder_path}"));
        assert_eq!(text, text.trim());
    }

    #[test]
    fn slot_text_inside_paths_is_literal() {
        let text = render_prompt("/x/{report_path}", "/r/a.docx", "a.docx").expect("prompt");
        assert!(text.contains("\"/x/{report_path}\""));
    }

    #[test]
    fn missing_arguments_are_invalid() {
        for args in [
            json!({"folder_path": "/docs"}),
            json!({"report_path": "/r.docx"}),
            json!({"report_path": "", "folder_path": "/docs"}),
        ] {
            let result = call(&ToolContext::default(), &args);
            assert_eq!(
                result
                    .pointer("/structuredContent/error/kind")
                    .and_then(|v| v.as_str()),
                Some(errors::INVALID_INPUT)
            );
        }
    }
}
