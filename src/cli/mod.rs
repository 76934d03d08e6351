//! CLI layer for pdf-assistant.
//!
//! Provides the command-line interface using clap: one-shot extraction and
//! questions, an interactive chat loop, and the server front ends.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
#[cfg(feature = "mcp")]
pub use parser::McpCommands;
pub use parser::{Cli, Commands};
