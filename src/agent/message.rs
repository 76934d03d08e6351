//! Conversation model for one assistant run.
//!
//! A run always has the same shape: the instructions, one question, then
//! zero or more rounds of tool calls each followed by their outputs.
//! [`Turn`] has exactly those four cases, so a backend only maps four
//! variants onto its wire format.

use std::ops::AddAssign;

use super::tool::{ToolCall, ToolDefinition, ToolResult};

/// Sampling temperature used when a request does not set one.
const DEFAULT_TEMPERATURE: f32 = 0.0;
/// Completion budget used when a request does not set one.
const DEFAULT_MAX_TOKENS: u32 = 2048;

/// One entry in the conversation sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Assistant instructions, sent as the system message.
    Instructions(String),
    /// The agent input: question and file path.
    Question(String),
    /// Tool calls the model asked for.
    ToolCalls(Vec<ToolCall>),
    /// Output of one tool call.
    ToolOutput {
        /// Id of the call this answers.
        call_id: String,
        /// Page text or a `❌` message.
        content: String,
    },
}

/// Everything sent to the model for one completion.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,
    /// Conversation so far, oldest first.
    pub turns: Vec<Turn>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Completion budget per model call.
    pub max_tokens: u32,
    /// Tools the model may call.
    pub tools: Vec<ToolDefinition>,
}

impl ChatRequest {
    /// Opens a conversation with the instructions and the question.
    #[must_use]
    pub fn new(model: impl Into<String>, instructions: &str, question: &str) -> Self {
        Self {
            model: model.into(),
            turns: vec![
                Turn::Instructions(instructions.to_string()),
                Turn::Question(question.to_string()),
            ],
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            tools: Vec::new(),
        }
    }

    /// Sets temperature and completion budget.
    #[must_use]
    pub const fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Offers `tools` to the model.
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Records one tool round: the calls, then one output per result.
    pub fn push_round(&mut self, calls: Vec<ToolCall>, results: Vec<ToolResult>) {
        self.turns.push(Turn::ToolCalls(calls));
        self.turns
            .extend(results.into_iter().map(|r| Turn::ToolOutput {
                call_id: r.tool_call_id,
                content: r.content,
            }));
    }

    /// Number of tool rounds recorded so far.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| matches!(t, Turn::ToolCalls(_)))
            .count()
    }

    /// Tool outputs in the order they were recorded.
    pub fn tool_outputs(&self) -> impl Iterator<Item = &str> {
        self.turns.iter().filter_map(|t| match t {
            Turn::ToolOutput { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}

/// Token counts reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt.
    pub prompt_tokens: u32,
    /// Tokens generated in the completion.
    pub completion_tokens: u32,
    /// Total tokens used.
    pub total_tokens: u32,
}

impl AddAssign for TokenUsage {
    fn add_assign(&mut self, step: Self) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(step.prompt_tokens);
        self.completion_tokens = self
            .completion_tokens
            .saturating_add(step.completion_tokens);
        self.total_tokens = self.total_tokens.saturating_add(step.total_tokens);
    }
}

/// One model reply.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Text content; empty while the model is still calling tools.
    pub content: String,
    /// Token usage for this call.
    pub usage: TokenUsage,
    /// Tool calls requested by the model.
    pub tool_calls: Vec<ToolCall>,
    /// Finish reason (e.g., `"stop"`, `"tool_calls"`).
    pub finish_reason: Option<String>,
}

impl ChatResponse {
    /// A reply with no tool calls ends the run.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.tool_calls.is_empty()
    }
}
