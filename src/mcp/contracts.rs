use serde_json::json;

pub const TOOL_FETCH_WEATHER: &str = "report.fetch_weather";
pub const TOOL_DUPLICATE_FOLDER: &str = "report.duplicate_folder";
pub const TOOL_RENAME_BY_MONTH: &str = "report.rename_by_month";
pub const TOOL_FILL_TEMPLATE: &str = "report.fill_template";
pub const TOOL_EXTRACT_PDF_TEXT: &str = "report.extract_pdf_text";
pub const TOOL_BUILD_PROMPT: &str = "report.build_prompt";

pub const MAX_INPUT_BYTES: u64 = 50 * 1024 * 1024;

pub fn fetch_weather_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "location": {
                "type": "string",
                "description": "Latitude and longitude, e.g. \"39.7456,-97.0892\""
            }
        },
        "required": ["location"],
        "additionalProperties": false
    })
}

pub fn duplicate_folder_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "source_path": { "type": "string" },
            "dest_path": { "type": "string" }
        },
        "required": ["source_path", "dest_path"],
        "additionalProperties": false
    })
}

pub fn rename_by_month_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "folder_path": { "type": "string" },
            "month": { "type": "integer", "minimum": 1, "maximum": 12 }
        },
        "required": ["folder_path"],
        "additionalProperties": false
    })
}

pub fn fill_template_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "path": { "type": "string", "description": "Path to the .docx template, overwritten in place" },
            "month": { "type": "string" },
            "activities": { "type": "string" },
            "conclusions": { "type": "string" },
            "recommendations": { "type": "string" },
            "title_rows": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "activity": { "type": "string" },
                        "month": { "type": "string" }
                    },
                    "required": ["activity", "month"]
                }
            },
            "description_rows": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "activity": { "type": "string" },
                        "description": { "type": "string" },
                        "verifier": { "type": "string" }
                    },
                    "required": ["activity", "description", "verifier"]
                }
            }
        },
        "required": ["path", "month", "activities", "conclusions", "recommendations"],
        "additionalProperties": false
    })
}

pub fn extract_pdf_text_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "folder_path": { "type": "string" }
        },
        "required": ["folder_path"],
        "additionalProperties": false
    })
}

pub fn build_prompt_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "report_path": { "type": "string" },
            "folder_path": { "type": "string" }
        },
        "required": ["report_path", "folder_path"],
        "additionalProperties": false
    })
}
