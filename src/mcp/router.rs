//! Tool registry and dispatch.
//!
//! The router is built once at startup from the loaded configuration and owns
//! everything a tool handler may need. Both the stdio server and the CLI
//! subcommands dispatch through the same instance.

use crate::config::AppConfig;
use crate::mcp::{contracts, errors};
use crate::tools::{self, error_result};
use serde_json::{Value, json};
use tracing::{info, warn};

/// Shared, read-only state handed to every tool call.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    pub config: AppConfig,
}

pub type ToolHandler = fn(&ToolContext, &Value) -> Value;

struct ToolEntry {
    name: &'static str,
    description: &'static str,
    input_schema: fn() -> Value,
    handler: ToolHandler,
}

pub struct ToolRouter {
    context: ToolContext,
    tools: Vec<ToolEntry>,
}

impl ToolRouter {
    pub fn new(config: AppConfig) -> Self {
        let mut router = Self {
            context: ToolContext { config },
            tools: Vec::new(),
        };

        router.register(
            contracts::TOOL_FETCH_WEATHER,
            "Fetch weather point metadata for a latitude,longitude location.",
            contracts::fetch_weather_schema,
            tools::fetch_weather::call,
        );
        router.register(
            contracts::TOOL_DUPLICATE_FOLDER,
            "Recursively copy a folder to a new, non-existing destination.",
            contracts::duplicate_folder_schema,
            tools::duplicate_folder::call,
        );
        router.register(
            contracts::TOOL_RENAME_BY_MONTH,
            "Rename files in a folder, replacing the month in each name with the current month.",
            contracts::rename_by_month_schema,
            tools::rename_by_month::call,
        );
        router.register(
            contracts::TOOL_FILL_TEMPLATE,
            "Fill {activities}, {month}, {conclusions}, {recommendations}, {titleActivities} and {descriptionActivities} markers in a DOCX template.",
            contracts::fill_template_schema,
            tools::fill_template::call,
        );
        router.register(
            contracts::TOOL_EXTRACT_PDF_TEXT,
            "Extract plain text from every PDF file in a folder.",
            contracts::extract_pdf_text_schema,
            tools::extract_pdf_text::call,
        );
        router.register(
            contracts::TOOL_BUILD_PROMPT,
            "Build the instruction prompt for generating a monthly report from a folder of PDFs.",
            contracts::build_prompt_schema,
            tools::build_prompt::call,
        );

        router
    }

    fn register(
        &mut self,
        name: &'static str,
        description: &'static str,
        input_schema: fn() -> Value,
        handler: ToolHandler,
    ) {
        self.tools.push(ToolEntry {
            name,
            description,
            input_schema,
            handler,
        });
    }

    pub fn definitions(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": (tool.input_schema)()
                })
            })
            .collect()
    }

    pub fn call(&self, name: &str, args: &Value) -> Value {
        let Some(tool) = self.tools.iter().find(|tool| tool.name == name) else {
            warn!(tool = name, "unknown tool requested");
            return error_result(
                errors::INVALID_INPUT,
                format!("tool not implemented: {name}"),
                Some(name),
            );
        };

        info!(tool = name, "tool call");
        let result = (tool.handler)(&self.context, args);

        let failed = result
            .get("isError")
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        if failed {
            let message = result
                .get("structuredContent")
                .and_then(|value| value.get("error"))
                .and_then(|value| value.get("message"))
                .and_then(|value| value.as_str())
                .unwrap_or("tool error");
            warn!(tool = name, error = message, "tool failed");
        } else {
            info!(tool = name, "tool completed");
        }

        result
    }
}
