//! MCP (Model Context Protocol) server for pdf-assistant.
//!
//! Lets other agents read PDFs and ask the assistant about them.
//!
//! # Feature Gate
//!
//! This module requires the `mcp` feature flag:
//! ```toml
//! [dependencies]
//! pdf-assistant = { version = "...", features = ["mcp"] }
//! ```
//!
//! # Tools
//!
//! ```text
//! read_pdf { file_path }           → page text or ❌ message
//! ask_pdf  { question, file_path } → spawn_blocking → SyncBridge::ask → answer
//! ```

pub mod params;
pub mod server;
pub mod transport;

pub use params::{AskPdfParams, ReadPdfParams};
pub use server::PdfAssistantMcpServer;
pub use transport::{serve_sse, serve_stdio};
