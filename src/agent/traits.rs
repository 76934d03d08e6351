//! Agent trait definition.
//!
//! An agent is a name, a system prompt, a model configuration and the tools
//! it may call. [`execute_with_tools`] runs one question against a provider.

use super::executor::ToolExecutor;
use super::message::{ChatRequest, TokenUsage};
use super::providers::LlmProvider;
use super::tool::ToolDefinition;
use crate::error::AgentError;

/// Response from an agent execution.
#[derive(Debug, Clone)]
pub struct AgentResponse {
    /// The agent's final text output.
    pub content: String,
    /// Token usage summed over the whole turn.
    pub usage: TokenUsage,
    /// Why the model stopped generating (e.g. `"stop"`, `"length"`).
    pub finish_reason: Option<String>,
}

/// Trait implemented by agents.
pub trait Agent: Send + Sync {
    /// Agent name for logging and identification.
    fn name(&self) -> &str;

    /// Model identifier to use for this agent.
    fn model(&self) -> &str;

    /// System prompt that defines the agent's role and behavior.
    fn system_prompt(&self) -> &str;

    /// Sampling temperature (0.0 = deterministic, higher = more creative).
    fn temperature(&self) -> f32 {
        0.0
    }

    /// Maximum tokens for the response.
    fn max_tokens(&self) -> u32 {
        2048
    }

    /// Tool definitions offered to the model.
    fn tools(&self) -> Vec<ToolDefinition>;

    /// Maximum tool-calling loop iterations before aborting.
    fn max_tool_iterations(&self) -> usize {
        10
    }

    /// Builds the opening request for one question.
    fn request(&self, user_msg: &str) -> ChatRequest {
        ChatRequest::new(self.model(), self.system_prompt(), user_msg)
            .with_sampling(self.temperature(), self.max_tokens())
            .with_tools(self.tools())
    }
}

/// Runs `user_msg` through the agentic loop with the agent's tools.
///
/// # Errors
///
/// Returns [`AgentError`] on API failures or if the tool loop exceeds the
/// agent's max iterations. Tool failures are not errors; the model sees
/// their text.
pub async fn execute_with_tools(
    agent: &dyn Agent,
    provider: &dyn LlmProvider,
    user_msg: &str,
    executor: &ToolExecutor,
) -> Result<AgentResponse, AgentError> {
    let mut request = agent.request(user_msg);
    let response = super::agentic_loop::agentic_loop(
        provider,
        &mut request,
        executor,
        agent.max_tool_iterations(),
    )
    .await?;

    Ok(AgentResponse {
        content: response.content,
        usage: response.usage,
        finish_reason: response.finish_reason,
    })
}
