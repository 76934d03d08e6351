//! Tool-calling agent for PDF question answering.
//!
//! Uses a pluggable provider abstraction backed by OpenAI-compatible APIs.
//!
//! # Architecture
//!
//! ```text
//! "{question},{path}" → PdfAssistantAgent
//!   └── agentic_loop
//!       ├── LlmProvider::complete
//!       ├── ToolExecutor::execute(read_pdf) → page text or ❌ message
//!       └── repeat until the model answers in text
//! ```

pub mod agentic_loop;
pub mod client;
pub mod config;
pub mod executor;
pub mod message;
pub mod pdf_agent;
pub mod prompt;
pub mod providers;
pub mod tool;
pub mod traits;

pub use client::create_provider;
pub use config::AgentConfig;
pub use executor::ToolExecutor;
pub use message::{ChatRequest, ChatResponse, TokenUsage, Turn};
pub use pdf_agent::PdfAssistantAgent;
pub use prompt::{DEFAULT_INSTRUCTIONS, build_agent_input, load_instructions};
pub use providers::{LlmProvider, OpenAiProvider};
pub use tool::{ToolCall, ToolDefinition, ToolResult, ToolSet};
pub use traits::{Agent, AgentResponse, execute_with_tools};
