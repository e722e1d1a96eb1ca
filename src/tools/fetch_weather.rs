use crate::config::WeatherConfig;
use crate::input::require_str;
use crate::mcp::ToolContext;
use crate::tools::{ToolError, ToolResult, render, success_result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

pub fn call(context: &ToolContext, args: &Value) -> Value {
    render(fetch(&context.config.weather, args))
}

fn fetch(config: &WeatherConfig, args: &Value) -> ToolResult {
    let location = require_str(args, "location")?.trim();
    let url = points_url(&config.api_base, location);
    debug!(%url, "requesting weather data");

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(ToolError::external)?;

    let data: Value = client
        .get(&url)
        .header(USER_AGENT, config.user_agent.as_str())
        .header(ACCEPT, "application/geo+json, application/json")
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.json())
        .map_err(|err| ToolError::external(err).with_source(url.as_str()))?;
    info!(location, "weather data fetched");

    let text = serde_json::to_string_pretty(&data).map_err(|err| ToolError::internal(err.to_string()))?;
    Ok(success_result(text, data))
}

fn points_url(api_base: &str, location: &str) -> String {
    format!("{}/points/{location}", api_base.trim_end_matches('/'))
}
