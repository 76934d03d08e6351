//! The PDF assistant agent.

use super::config::AgentConfig;
use super::prompt::{DEFAULT_INSTRUCTIONS, load_instructions};
use super::tool::{ToolDefinition, ToolSet};
use super::traits::Agent;

/// Display name of the assistant.
pub const AGENT_NAME: &str = "PDF Assistant";

/// Agent that answers questions about a PDF using the `read_pdf` tool.
///
/// Immutable once built, so one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct PdfAssistantAgent {
    instructions: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    max_tool_iterations: usize,
    tools: ToolSet,
}

impl PdfAssistantAgent {
    /// Creates the agent with explicit instructions.
    #[must_use]
    pub fn new(config: &AgentConfig, instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_tool_iterations: config.max_tool_iterations,
            tools: ToolSet::pdf_tools(),
        }
    }

    /// Creates the agent with instructions resolved from
    /// `config.instructions_file` and the usual fallbacks.
    #[must_use]
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(config, load_instructions(config.instructions_file.as_deref()))
    }

    /// Creates the agent with the compiled-in instructions.
    #[must_use]
    pub fn with_default_instructions(config: &AgentConfig) -> Self {
        Self::new(config, DEFAULT_INSTRUCTIONS)
    }
}

impl Agent for PdfAssistantAgent {
    fn name(&self) -> &str {
        AGENT_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn system_prompt(&self) -> &str {
        &self.instructions
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        self.tools.definitions().to_vec()
    }

    fn max_tool_iterations(&self) -> usize {
        self.max_tool_iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::tool::READ_PDF;

    fn config() -> AgentConfig {
        AgentConfig::builder()
            .api_key("k")
            .model("gpt-4o-mini")
            .max_tool_iterations(3)
            .build()
            .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn test_agent_shape() {
        let agent = PdfAssistantAgent::with_default_instructions(&config());
        assert_eq!(agent.name(), "PDF Assistant");
        assert_eq!(agent.model(), "gpt-4o-mini");
        assert_eq!(agent.system_prompt(), DEFAULT_INSTRUCTIONS);
        assert_eq!(agent.max_tool_iterations(), 3);

        let tools = agent.tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, READ_PDF);
    }

    #[test]
    fn test_custom_instructions() {
        let agent = PdfAssistantAgent::new(&config(), "Only answer in French.");
        assert_eq!(agent.system_prompt(), "Only answer in French.");
    }
}
