//! Backend for OpenAI-compatible chat completion endpoints.
//!
//! Gemini's compatibility endpoint and local proxies use the same client
//! with a different base URL from [`AgentConfig`].

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessage,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestToolMessage,
    ChatCompletionRequestToolMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, ChatCompletionTool, ChatCompletionToolType,
    CreateChatCompletionRequest, CreateChatCompletionResponse, FunctionCall, FunctionObject,
};
use async_trait::async_trait;
use tracing::debug;

use super::LlmProvider;
use crate::agent::config::AgentConfig;
use crate::agent::message::{ChatRequest, ChatResponse, TokenUsage, Turn};
use crate::agent::tool::{ToolCall, ToolDefinition};
use crate::error::AgentError;

/// Client for one OpenAI-compatible endpoint.
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
}

impl OpenAiProvider {
    /// Creates a client from the key and optional base URL in `config`.
    #[must_use]
    pub fn new(config: &AgentConfig) -> Self {
        let mut openai = OpenAIConfig::new().with_api_key(&config.api_key);
        if let Some(base_url) = &config.base_url {
            openai = openai.with_api_base(base_url);
        }
        Self {
            client: Client::with_config(openai),
        }
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider").finish_non_exhaustive()
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        debug!(
            model = request.model,
            turns = request.turns.len(),
            rounds = request.rounds(),
            "sending chat completion"
        );

        let response = self
            .client
            .chat()
            .create(to_wire_request(request))
            .await
            .map_err(api_error)?;

        Ok(from_wire_response(response))
    }
}

fn to_wire_request(request: &ChatRequest) -> CreateChatCompletionRequest {
    let tools = (!request.tools.is_empty())
        .then(|| request.tools.iter().map(to_wire_tool).collect::<Vec<_>>());

    CreateChatCompletionRequest {
        model: request.model.clone(),
        messages: request.turns.iter().map(to_wire_turn).collect(),
        // Zero leaves sampling to the endpoint's default.
        temperature: (request.temperature > 0.0).then_some(request.temperature),
        max_completion_tokens: Some(request.max_tokens),
        tools,
        ..Default::default()
    }
}

fn to_wire_turn(turn: &Turn) -> ChatCompletionRequestMessage {
    match turn {
        Turn::Instructions(text) => {
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(text.clone()),
                name: None,
            })
        }
        Turn::Question(text) => {
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(text.clone()),
                name: None,
            })
        }
        Turn::ToolCalls(calls) => {
            let tool_calls = calls
                .iter()
                .map(|call| ChatCompletionMessageToolCall {
                    id: call.id.clone(),
                    r#type: ChatCompletionToolType::Function,
                    function: FunctionCall {
                        name: call.name.clone(),
                        arguments: call.arguments.clone(),
                    },
                })
                .collect();

            #[allow(deprecated)]
            ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                content: None,
                refusal: None,
                name: None,
                audio: None,
                tool_calls: Some(tool_calls),
                function_call: None,
            })
        }
        Turn::ToolOutput { call_id, content } => {
            ChatCompletionRequestMessage::Tool(ChatCompletionRequestToolMessage {
                content: ChatCompletionRequestToolMessageContent::Text(content.clone()),
                tool_call_id: call_id.clone(),
            })
        }
    }
}

fn to_wire_tool(def: &ToolDefinition) -> ChatCompletionTool {
    ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: def.name.clone(),
            description: Some(def.description.clone()),
            parameters: Some(def.parameters.clone()),
            strict: None,
        },
    }
}

/// Takes the first choice; an empty choice list is an empty final answer.
fn from_wire_response(response: CreateChatCompletionResponse) -> ChatResponse {
    let usage = response
        .usage
        .map_or_else(TokenUsage::default, |u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

    let Some(choice) = response.choices.into_iter().next() else {
        return ChatResponse {
            content: String::new(),
            usage,
            tool_calls: Vec::new(),
            finish_reason: None,
        };
    };

    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|tc| ToolCall {
            id: tc.id,
            name: tc.function.name,
            arguments: tc.function.arguments,
        })
        .collect();

    // Serialized form keeps the wire spelling ("tool_calls", "stop").
    let finish_reason = choice
        .finish_reason
        .and_then(|fr| serde_json::to_value(fr).ok())
        .and_then(|v| v.as_str().map(str::to_string));

    ChatResponse {
        content: choice.message.content.unwrap_or_default(),
        usage,
        tool_calls,
        finish_reason,
    }
}

/// Keeps the HTTP status when the transport reported one.
fn api_error(e: OpenAIError) -> AgentError {
    let status = match &e {
        OpenAIError::Reqwest(re) => re.status().map(|s| s.as_u16()),
        _ => None,
    };
    AgentError::ApiRequest {
        message: e.to_string(),
        status,
    }
}
