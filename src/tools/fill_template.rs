use crate::docx::{Document, illegal_char};
use crate::input::require_document;
use crate::mcp::ToolContext;
use crate::template::{self, DescriptionRow, TemplateValues, TitleRow};
use crate::tools::{ToolError, ToolResult, render, success_result};
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FillArgs {
    path: String,
    month: String,
    activities: String,
    #[serde(alias = "conclusiones")]
    conclusions: String,
    recommendations: String,
    #[serde(default, alias = "title_activities")]
    title_rows: Vec<TitleRow>,
    #[serde(default, alias = "description_activities")]
    description_rows: Vec<DescriptionRow>,
}

pub fn call(_context: &ToolContext, args: &Value) -> Value {
    render(fill(args))
}

fn fill(args: &Value) -> ToolResult {
    let args: FillArgs = serde_json::from_value(args.clone())
        .map_err(|err| ToolError::invalid_input(format!("invalid arguments: {err}")))?;
    let path = args.path.as_str();

    let format = require_document(path)?;
    check_xml_text(&args)?;
    debug!(path, format = format.as_str(), "opening template");

    let mut document = Document::open(Path::new(path))
        .map_err(|err| ToolError::external(err).with_source(path))?;

    let values = TemplateValues {
        month: args.month,
        activities: args.activities,
        conclusions: args.conclusions,
        recommendations: args.recommendations,
        title_rows: args.title_rows,
        description_rows: args.description_rows,
    };
    let summary = template::fill(&mut document, &values)
        .map_err(|err| ToolError::external(err).with_source(path))?;

    if !summary.modified() {
        let message = "No placeholders found in the document.";
        return Ok(success_result(
            message,
            json!({
                "message": message,
                "path": path,
                "replaced": false,
                "tables_inserted": 0,
                "paragraphs_updated": 0,
                "cells_updated": 0
            }),
        ));
    }

    document
        .save(Path::new(path))
        .map_err(|err| ToolError::external(err).with_source(path))?;

    info!(
        path,
        tables = summary.tables_inserted,
        paragraphs = summary.paragraphs_updated,
        cells = summary.cells_updated,
        "template filled"
    );

    let message = format!("Replaced placeholders and saved '{path}'.");
    Ok(success_result(
        message.clone(),
        json!({
            "message": message,
            "path": path,
            "replaced": true,
            "tables_inserted": summary.tables_inserted,
            "paragraphs_updated": summary.paragraphs_updated,
            "cells_updated": summary.cells_updated
        }),
    ))
}

/// Reject values the document cannot store before anything is opened.
fn check_xml_text(args: &FillArgs) -> Result<(), ToolError> {
    let mut fields = vec![
        ("month", args.month.as_str()),
        ("activities", args.activities.as_str()),
        ("conclusions", args.conclusions.as_str()),
        ("recommendations", args.recommendations.as_str()),
    ];
    for row in &args.title_rows {
        fields.push(("title_rows.activity", row.activity.as_str()));
        fields.push(("title_rows.month", row.month.as_str()));
    }
    for row in &args.description_rows {
        fields.push(("description_rows.activity", row.activity.as_str()));
        fields.push(("description_rows.description", row.description.as_str()));
        fields.push(("description_rows.verifier", row.verifier.as_str()));
    }

    for (field, value) in fields {
        if let Some(ch) = illegal_char(value) {
            return Err(ToolError::invalid_input(format!(
                "{field} contains a character not allowed in XML: U+{:04X}",
                u32::from(ch)
            ))
            .with_source(args.path.as_str()));
        }
    }
    Ok(())
}
