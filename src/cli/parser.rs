//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AI PDF Assistant: ask questions about PDF documents.
///
/// An LLM agent reads the PDF through its `read_pdf` tool and answers
/// with headings, structure, and emojis.
#[derive(Parser, Debug)]
#[command(name = "pdf-assistant")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging on stderr (`RUST_LOG` takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// Model to use (overrides `PDF_ASSISTANT_MODEL`).
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Seconds to wait for an answer (overrides `PDF_ASSISTANT_TIMEOUT_SECS`).
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// File whose contents replace the built-in assistant instructions.
    #[arg(long, global = true, value_name = "FILE")]
    pub instructions: Option<PathBuf>,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the text of a PDF with page markers.
    ///
    /// Unreadable files print a message starting with ❌ and still exit 0.
    #[command(after_help = r#"Examples:
  pdf-assistant extract book.pdf
  pdf-assistant --format json extract book.pdf | jq -r .text
"#)]
    Extract {
        /// Path to the PDF.
        file: PathBuf,
    },

    /// Ask one question about a PDF.
    #[command(after_help = r#"Examples:
  pdf-assistant ask book.pdf "Summarize chapter 2"
  pdf-assistant --model gpt-4o --timeout 120 ask book.pdf list the MCQs
"#)]
    Ask {
        /// Path to the PDF.
        file: PathBuf,

        /// The question (multiple words are joined with spaces).
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Ask questions about a PDF interactively until `exit`.
    Chat {
        /// Path to the PDF.
        file: PathBuf,
    },

    /// Serve the upload page in a browser.
    #[cfg(feature = "server")]
    #[command(after_help = r#"Examples:
  pdf-assistant serve                          # http://127.0.0.1:8501/
  pdf-assistant serve --host 0.0.0.0 --port 8080 --upload-dir /tmp/uploads
"#)]
    Serve {
        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on.
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Directory uploaded PDFs are written to.
        #[arg(long, env = "PDF_ASSISTANT_UPLOAD_DIR", default_value = ".")]
        upload_dir: PathBuf,
    },

    /// Start MCP (Model Context Protocol) server.
    #[cfg(feature = "mcp")]
    #[command(subcommand)]
    Mcp(McpCommands),
}

/// MCP server subcommands.
#[cfg(feature = "mcp")]
#[derive(Subcommand, Debug)]
pub enum McpCommands {
    /// Start MCP server with stdio transport.
    ///
    /// Reads JSON-RPC messages from stdin, writes responses to stdout.
    #[command(after_help = r#"Examples:
  OPENAI_API_KEY=sk-... pdf-assistant mcp stdio
"#)]
    Stdio,

    /// Start MCP server with streamable HTTP transport.
    #[command(after_help = r#"Examples:
  pdf-assistant mcp sse                            # Listen on 127.0.0.1:3000
  pdf-assistant mcp sse --host 0.0.0.0 --port 8080
"#)]
    Sse {
        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}
