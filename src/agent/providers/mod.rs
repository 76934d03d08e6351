//! Model backends.
//!
//! The agent loop only sees [`LlmProvider`]; [`OpenAiProvider`] is the one
//! shipped backend and serves every OpenAI-compatible endpoint.

pub mod openai;

use async_trait::async_trait;

use super::message::{ChatRequest, ChatResponse};
use crate::error::AgentError;

pub use openai::OpenAiProvider;

/// A chat model that can answer with text or with tool calls.
///
/// One instance is shared by every run, so implementations hold no
/// per-conversation state.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Backend label for logs.
    fn name(&self) -> &'static str;

    /// Sends the conversation in `request` and returns the next reply.
    ///
    /// Tool calls come back in the order the model listed them.
    ///
    /// # Errors
    ///
    /// Transport and API failures. A failing tool is never an error here.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError>;
}
