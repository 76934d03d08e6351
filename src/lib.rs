//! # pdf-assistant
//!
//! Ask questions about PDF documents. A tool-calling LLM agent reads the PDF
//! through a single `read_pdf` tool and answers in structured Markdown.
//!
//! ## Layers
//!
//! - [`pdf`]: page-by-page text extraction with `--- Page N ---` markers;
//!   failures are tagged [`pdf::ExtractError`]s whose text starts with `❌`
//! - [`agent`]: the [`agent::PdfAssistantAgent`], its tool, and an
//!   OpenAI-compatible tool-calling loop behind [`agent::LlmProvider`]
//! - [`bridge`]: [`SyncBridge`] runs the async agent from blocking code with
//!   a timeout, whether or not a runtime is already active
//! - [`upload`], `web`, `mcp`, [`cli`]: the ways documents and questions
//!   come in
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use pdf_assistant::{AgentConfig, SyncBridge};
//!
//! let config = AgentConfig::from_env()?;
//! let bridge = SyncBridge::from_config(&config)?;
//! let answer = bridge.ask("Summarize chapter 2", Path::new("book.pdf"))?;
//! println!("{answer}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod agent;
pub mod bridge;
pub mod cli;
pub mod error;
pub mod pdf;
pub mod upload;

#[cfg(feature = "mcp")]
pub mod mcp;
#[cfg(feature = "server")]
pub mod web;

pub use agent::{AgentConfig, PdfAssistantAgent};
pub use bridge::SyncBridge;
pub use error::{AgentError, BridgeError, CommandError, Error, Result};
pub use pdf::{ExtractError, extract_text, read_pdf};
