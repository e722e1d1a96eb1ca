use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value, json};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod docx;
mod input;
mod mcp;
mod template;
mod tools;

use config::AppConfig;
use mcp::{ToolRouter, contracts};

const LOG_ENV: &str = "MCP_REPORT_LOG";

#[derive(Parser)]
#[command(name = "mcp-report")]
#[command(
    version,
    about = "Monthly report utilities: DOCX template filling, PDF text, folder housekeeping, MCP server"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output JSON structuredContent
    #[arg(long)]
    json: bool,
}

#[derive(Args, Clone)]
struct FillTemplateArgs {
    /// Path to the DOCX template, edited in place
    #[arg(long)]
    path: String,
    /// Text for {month}
    #[arg(long)]
    month: String,
    /// Text for {activities}
    #[arg(long)]
    activities: String,
    /// Text for {conclusions}
    #[arg(long)]
    conclusions: String,
    /// Text for {recommendations}
    #[arg(long)]
    recommendations: String,
    /// JSON array of {"activity", "month"} objects
    #[arg(long)]
    title_rows: Option<String>,
    /// JSON array of {"activity", "description", "verifier"} objects
    #[arg(long)]
    description_rows: Option<String>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Clone)]
struct FolderArgs {
    /// Folder to operate on
    #[arg(long)]
    folder_path: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Clone)]
struct DuplicateFolderArgs {
    /// Existing folder to copy
    #[arg(long)]
    source_path: String,
    /// Destination folder, must not exist
    #[arg(long)]
    dest_path: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Clone)]
struct RenameByMonthArgs {
    #[command(flatten)]
    folder: FolderArgs,
    /// Month number (1-12); defaults to the current month
    #[arg(long)]
    month: Option<u64>,
}

#[derive(Args, Clone)]
struct BuildPromptArgs {
    /// Report document the agent should fill
    #[arg(long)]
    report_path: String,
    /// Folder holding the source PDFs
    #[arg(long)]
    folder_path: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Clone)]
struct FetchWeatherArgs {
    /// "latitude,longitude"
    #[arg(long)]
    location: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP stdio server
    Serve {
        /// Serve MCP over stdio (NDJSON)
        #[arg(long)]
        stdio: bool,
    },
    /// Fill placeholders in a DOCX report template
    FillTemplate(FillTemplateArgs),
    /// Extract text from every PDF in a folder
    ExtractPdfText(FolderArgs),
    /// Copy a folder recursively
    DuplicateFolder(DuplicateFolderArgs),
    /// Replace the month in file names
    RenameByMonth(RenameByMonthArgs),
    /// Print the monthly report instruction prompt
    BuildPrompt(BuildPromptArgs),
    /// Fetch weather point data
    FetchWeather(FetchWeatherArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let router = ToolRouter::new(config);

    match cli.command {
        Commands::Serve { stdio } => {
            if stdio {
                run_stdio_server(&router)
            } else {
                anyhow::bail!("only --stdio transport is supported")
            }
        }
        Commands::FillTemplate(args) => run_fill_template(&router, args),
        Commands::ExtractPdfText(args) => {
            let map = string_args([("folder_path", args.folder_path)]);
            run_tool(&router, contracts::TOOL_EXTRACT_PDF_TEXT, map, &args.output)
        }
        Commands::DuplicateFolder(args) => {
            let map = string_args([
                ("source_path", args.source_path),
                ("dest_path", args.dest_path),
            ]);
            run_tool(&router, contracts::TOOL_DUPLICATE_FOLDER, map, &args.output)
        }
        Commands::RenameByMonth(args) => {
            let mut map = string_args([("folder_path", args.folder.folder_path)]);
            if let Some(month) = args.month {
                map.insert("month".to_string(), json!(month));
            }
            run_tool(&router, contracts::TOOL_RENAME_BY_MONTH, map, &args.folder.output)
        }
        Commands::BuildPrompt(args) => {
            let map = string_args([
                ("report_path", args.report_path),
                ("folder_path", args.folder_path),
            ]);
            run_tool(&router, contracts::TOOL_BUILD_PROMPT, map, &args.output)
        }
        Commands::FetchWeather(args) => {
            let map = string_args([("location", args.location)]);
            run_tool(&router, contracts::TOOL_FETCH_WEATHER, map, &args.output)
        }
    }
}

/// Logs go to stderr; stdout is reserved for protocol traffic and command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run_fill_template(router: &ToolRouter, args: FillTemplateArgs) -> Result<()> {
    let mut map = string_args([
        ("path", args.path),
        ("month", args.month),
        ("activities", args.activities),
        ("conclusions", args.conclusions),
        ("recommendations", args.recommendations),
    ]);
    if let Some(rows) = args.title_rows {
        let rows: Value = serde_json::from_str(&rows).context("--title-rows must be JSON")?;
        map.insert("title_rows".to_string(), rows);
    }
    if let Some(rows) = args.description_rows {
        let rows: Value =
            serde_json::from_str(&rows).context("--description-rows must be JSON")?;
        map.insert("description_rows".to_string(), rows);
    }
    run_tool(router, contracts::TOOL_FILL_TEMPLATE, map, &args.output)
}

fn string_args<const N: usize>(pairs: [(&str, String); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value)))
        .collect()
}

fn run_tool(
    router: &ToolRouter,
    name: &str,
    args: Map<String, Value>,
    output: &OutputArgs,
) -> Result<()> {
    let result = router.call(name, &Value::Object(args));
    print_tool_result(result, output.json)
}

fn print_tool_result(result: Value, json_output: bool) -> Result<()> {
    let is_error = result
        .get("isError")
        .and_then(|value| value.as_bool())
        .unwrap_or(false);

    if is_error {
        let message = result
            .get("structuredContent")
            .and_then(|value| value.get("error"))
            .and_then(|value| value.get("message"))
            .and_then(|value| value.as_str())
            .unwrap_or("tool error");
        eprintln!("{message}");
        process::exit(1);
    }

    if json_output {
        let structured = result
            .get("structuredContent")
            .cloned()
            .unwrap_or_else(|| json!({}));
        let output = serde_json::to_string_pretty(&structured)?;
        println!("{output}");
        return Ok(());
    }

    let text = result
        .get("content")
        .and_then(|value| value.as_array())
        .and_then(|arr| arr.first())
        .and_then(|value| value.get("text"))
        .and_then(|value| value.as_str())
        .unwrap_or("");
    println!("{text}");
    Ok(())
}

fn run_stdio_server(router: &ToolRouter) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let reader = stdin.lock().lines();
    let mut writer = io::BufWriter::new(stdout.lock());
    info!("serving MCP over stdio");

    for line in reader {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let request: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(err) => {
                debug!(error = %err, "skipping unparseable line");
                continue;
            }
        };

        let method = request.get("method").and_then(|value| value.as_str());
        let id = request.get("id").cloned();
        let response = match (method, id) {
            (_, None) => None,
            (Some("initialize"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "protocolVersion": "2025-11-25",
                    "capabilities": {
                        "tools": {}
                    },
                    "serverInfo": {
                        "name": env!("CARGO_PKG_NAME"),
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }
            })),
            (Some("ping"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {}
            })),
            (Some("tools/list"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "tools": router.definitions()
                }
            })),
            (Some("tools/call"), Some(id)) => {
                let result = handle_tool_call(router, &request);
                Some(json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": result
                }))
            }
            (method, Some(id)) => {
                debug!(method = method.unwrap_or(""), "method not found");
                Some(json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": {
                        "code": -32601,
                        "message": format!("method not found: {}", method.unwrap_or(""))
                    }
                }))
            }
        };

        if let Some(response) = response {
            let serialized =
                serde_json::to_string(&response).context("failed to serialize response")?;
            writeln!(writer, "{serialized}").context("failed to write response")?;
            writer.flush().context("failed to flush response")?;
        }
    }

    Ok(())
}

fn handle_tool_call(router: &ToolRouter, request: &Value) -> Value {
    let params = request.get("params");
    let Some(params) = params.and_then(|value| value.as_object()) else {
        return tools::error_result(mcp::errors::INVALID_INPUT, "params must be an object", None);
    };

    let name = params.get("name").and_then(|value| value.as_str());
    let Some(name) = name else {
        return tools::error_result(
            mcp::errors::INVALID_INPUT,
            "params.name must be a string",
            None,
        );
    };

    let args = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| json!({}));

    router.call(name, &args)
}
