//! CLI command implementations.
//!
//! Contains the business logic for each CLI command. Commands return their
//! output as a string for `main` to print; `chat` is interactive and writes
//! as it goes.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::agent::config::{AgentConfig, AgentConfigBuilder};
use crate::bridge::SyncBridge;
#[cfg(feature = "mcp")]
use crate::cli::parser::McpCommands;
use crate::cli::output::{AskOutput, ExtractOutput, OutputFormat};
use crate::cli::parser::{Cli, Commands};
#[cfg(any(feature = "server", feature = "mcp"))]
use crate::error::CommandError;
use crate::error::Result;
use crate::pdf::{self, FAILURE_MARKER};

/// Banner printed before every interactive prompt.
pub const CHAT_BANNER: &str = "---- Type (Exit) to end the conversation. ---";
/// Interactive prompt.
pub const CHAT_PROMPT: &str = "Enter Query: ";

/// Executes the CLI command.
///
/// # Errors
///
/// Returns an error if the command fails to execute. Extraction failures
/// are not errors; their `❌` text is the command output.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Extract { file } => Ok(cmd_extract(file, format)),
        Commands::Ask { file, question } => {
            let bridge = SyncBridge::from_config(&load_config(cli)?)?;
            cmd_ask(&bridge, file, &question.join(" "), format)
        }
        Commands::Chat { file } => {
            let bridge = SyncBridge::from_config(&load_config(cli)?)?;
            let stdin = io::stdin();
            cmd_chat(&bridge, file, stdin.lock(), io::stdout())
        }
        #[cfg(feature = "server")]
        Commands::Serve {
            host,
            port,
            upload_dir,
        } => {
            let bridge = SyncBridge::from_config(&load_config(cli)?)?;
            cmd_serve(bridge, host, *port, upload_dir)
        }
        #[cfg(feature = "mcp")]
        Commands::Mcp(cmd) => {
            let bridge = SyncBridge::from_config(&load_config(cli)?)?;
            cmd_mcp(cmd, bridge)
        }
    }
}

/// Applies the global CLI overrides to a fresh config builder.
pub fn config_builder(cli: &Cli) -> AgentConfigBuilder {
    let mut builder = AgentConfig::builder();
    if let Some(model) = &cli.model {
        builder = builder.model(model);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.bridge_timeout(Duration::from_secs(secs));
    }
    if let Some(path) = &cli.instructions {
        builder = builder.instructions_file(path);
    }
    builder
}

/// Resolves the agent configuration: CLI flags, then environment, then defaults.
///
/// # Errors
///
/// Returns an error if no API key is configured.
pub fn load_config(cli: &Cli) -> Result<AgentConfig> {
    let config = config_builder(cli).from_env().build()?;
    debug!(
        provider = config.provider,
        model = config.model,
        timeout_secs = config.bridge_timeout.as_secs(),
        "agent configuration loaded"
    );
    Ok(config)
}

/// Extracts the text of `file`.
///
/// Always succeeds: an unreadable file yields its `❌` message.
pub fn cmd_extract(file: &Path, format: OutputFormat) -> String {
    let result = pdf::extract_text(file);
    match format {
        OutputFormat::Text => result.unwrap_or_else(|e| e.to_string()),
        OutputFormat::Json => {
            let file = file.to_string_lossy();
            let out = match &result {
                Ok(text) => ExtractOutput {
                    ok: true,
                    file: &file,
                    text: Some(text.as_str()),
                    error: None,
                },
                Err(e) => ExtractOutput {
                    ok: false,
                    file: &file,
                    text: None,
                    error: Some(e.to_string()),
                },
            };
            format.to_json(&out)
        }
    }
}

/// Asks one question and returns the formatted answer.
///
/// # Errors
///
/// Returns an error if the bridge fails or times out.
pub fn cmd_ask(
    bridge: &SyncBridge,
    file: &Path,
    question: &str,
    format: OutputFormat,
) -> Result<String> {
    let answer = bridge.ask(question, file)?;
    match format {
        OutputFormat::Text => Ok(answer),
        OutputFormat::Json => Ok(format.to_json(&AskOutput {
            question,
            file: &file.to_string_lossy(),
            answer: &answer,
        })),
    }
}

/// Runs the interactive question loop over `input` until `exit` or EOF.
///
/// A failed question prints its error and the loop continues.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn cmd_chat<R: BufRead, W: Write>(
    bridge: &SyncBridge,
    file: &Path,
    mut input: R,
    mut output: W,
) -> Result<String> {
    let mut line = String::new();
    loop {
        writeln!(output, "{CHAT_BANNER}")?;
        write!(output, "{CHAT_PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }
        let query = line.trim();
        if query.eq_ignore_ascii_case("exit") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        match bridge.ask(query, file) {
            Ok(answer) => writeln!(output, "{answer}")?,
            Err(e) => writeln!(output, "{FAILURE_MARKER} {e}")?,
        }
    }
    Ok(String::new())
}

/// Serves the upload page until Ctrl-C.
#[cfg(feature = "server")]
fn cmd_serve(bridge: SyncBridge, host: &str, port: u16, upload_dir: &Path) -> Result<String> {
    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to create async runtime: {e}"))
    })?;

    rt.block_on(crate::web::serve(bridge, upload_dir.to_path_buf(), host, port))
        .map_err(|e| CommandError::ExecutionFailed(format!("Web server error: {e}")))?;

    Ok(String::new())
}

/// Starts the MCP server with the specified transport.
#[cfg(feature = "mcp")]
fn cmd_mcp(cmd: &McpCommands, bridge: SyncBridge) -> Result<String> {
    use crate::mcp::{PdfAssistantMcpServer, serve_sse, serve_stdio};

    let server = PdfAssistantMcpServer::new(bridge);

    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to create async runtime: {e}"))
    })?;

    rt.block_on(async {
        match cmd {
            McpCommands::Stdio => serve_stdio(server).await,
            McpCommands::Sse { host, port } => serve_sse(server, host, *port).await,
        }
    })
    .map_err(|e| CommandError::ExecutionFailed(format!("MCP server error: {e}")))?;

    Ok(String::new())
}
