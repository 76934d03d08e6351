//! Agentic tool-calling loop.
//!
//! Drives the LLM ↔ tool execution round-trip: sends a request to the model,
//! executes any tool calls in the response, appends results, and repeats
//! until the model produces a final text response or the iteration limit
//! is reached.

use tracing::{debug, warn};

use super::executor::ToolExecutor;
use super::message::{ChatRequest, ChatResponse, TokenUsage};
use super::providers::LlmProvider;
use crate::error::AgentError;

/// Runs an agentic loop: model → tool calls → tool results → model → …
///
/// Continues until the model responds without tool calls or
/// `max_iterations` model calls have been made.
///
/// Failed tool calls do not end the loop. Their `❌` text is sent back to
/// the model, which decides how to tell the user.
///
/// # Returns
///
/// The final [`ChatResponse`], with `usage` summed across every model call
/// in the loop.
///
/// # Errors
///
/// Returns [`AgentError::ToolLoopExceeded`] if the model keeps requesting
/// tools beyond `max_iterations`. Propagates any provider errors.
pub async fn agentic_loop(
    provider: &dyn LlmProvider,
    request: &mut ChatRequest,
    executor: &ToolExecutor,
    max_iterations: usize,
) -> Result<ChatResponse, AgentError> {
    let mut usage = TokenUsage::default();

    for iteration in 0..max_iterations {
        let mut response = provider.complete(request).await?;
        usage += response.usage;

        if response.is_final() {
            debug!(
                iteration,
                total_tokens = usage.total_tokens,
                "agentic loop completed with final text response"
            );
            response.usage = usage;
            return Ok(response);
        }

        debug!(
            iteration,
            tool_count = response.tool_calls.len(),
            "executing tool calls"
        );

        let results = response
            .tool_calls
            .iter()
            .map(|call| {
                let result = executor.execute(call);
                if result.is_error {
                    warn!(tool = call.name, call_id = call.id, "tool returned an error");
                }
                result
            })
            .collect();
        request.push_round(response.tool_calls, results);
    }

    Err(AgentError::ToolLoopExceeded { max_iterations })
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod tests {
    use super::*;
    use crate::agent::tool::{READ_PDF, ToolCall};
    use crate::pdf::fixtures::write_pdf;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tempfile::TempDir;

    /// Mock provider that asks for `read_pdf` on the first N calls,
    /// then answers with a fixed text.
    pub(crate) struct MockToolProvider {
        call_count: AtomicUsize,
        tool_rounds: usize,
        file_path: String,
    }

    impl MockToolProvider {
        pub(crate) fn new(tool_rounds: usize, file_path: impl Into<String>) -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                tool_rounds,
                file_path: file_path.into(),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmProvider for MockToolProvider {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AgentError> {
            let count = self.call_count.fetch_add(1, Ordering::SeqCst);

            let usage = TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            };
            if count < self.tool_rounds {
                Ok(ChatResponse {
                    content: String::new(),
                    usage,
                    tool_calls: vec![ToolCall {
                        id: format!("call_{count}"),
                        name: READ_PDF.to_string(),
                        arguments: serde_json::json!({ "file_path": self.file_path })
                            .to_string(),
                    }],
                    finish_reason: Some("tool_calls".to_string()),
                })
            } else {
                Ok(ChatResponse {
                    content: "**Summary** 📘 The document introduces Python.".to_string(),
                    usage,
                    tool_calls: Vec::new(),
                    finish_reason: Some("stop".to_string()),
                })
            }
        }
    }

    fn request() -> ChatRequest {
        ChatRequest::new("test", "You are a test agent.", "Summarize,/tmp/book.pdf")
    }

    #[tokio::test]
    async fn test_agentic_loop_single_tool_round() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = dir.path().join("book.pdf");
        write_pdf(&path, &["Introduction to Python"]);
        let provider = MockToolProvider::new(1, path.to_string_lossy());

        let mut request = request();
        let response = agentic_loop(&provider, &mut request, &ToolExecutor::new(), 10)
            .await
            .unwrap_or_else(|e| panic!("agentic_loop failed: {e}"));

        assert!(response.content.contains("Summary"));
        assert_eq!(request.rounds(), 1);
        let outputs: Vec<_> = request.tool_outputs().collect();
        assert_eq!(outputs.len(), 1);
        assert!(outputs[0].contains("--- Page 1 ---"));
        assert!(outputs[0].contains("Introduction"));
    }

    #[tokio::test]
    async fn test_agentic_loop_sums_usage() {
        let provider = MockToolProvider::new(2, "/missing.pdf");
        let mut request = request();

        let response = agentic_loop(&provider, &mut request, &ToolExecutor::new(), 10)
            .await
            .unwrap_or_else(|e| panic!("agentic_loop failed: {e}"));

        assert_eq!(provider.calls(), 3);
        assert_eq!(response.usage.total_tokens, 45);
        assert_eq!(response.usage.prompt_tokens, 30);
        assert_eq!(request.rounds(), 2);
        assert_eq!(request.turns.len(), 6);
    }

    #[tokio::test]
    async fn test_tool_failure_is_fed_back_to_model() {
        let provider = MockToolProvider::new(1, "/definitely/not/here.pdf");
        let mut request = request();

        let response = agentic_loop(&provider, &mut request, &ToolExecutor::new(), 10)
            .await
            .unwrap_or_else(|e| panic!("agentic_loop failed: {e}"));

        assert!(!response.content.is_empty());
        assert!(
            request
                .tool_outputs()
                .next()
                .is_some_and(|out| out.starts_with("❌"))
        );
    }

    #[tokio::test]
    async fn test_agentic_loop_exceeds_max() {
        let provider = MockToolProvider::new(100, "/missing.pdf");
        let mut request = request();

        let result = agentic_loop(&provider, &mut request, &ToolExecutor::new(), 2).await;
        assert!(
            matches!(result, Err(AgentError::ToolLoopExceeded { max_iterations: 2 })),
            "Expected ToolLoopExceeded, got: {result:?}"
        );
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_agentic_loop_no_tools() {
        let provider = MockToolProvider::new(0, "/unused.pdf");
        let mut request = request();

        let response = agentic_loop(&provider, &mut request, &ToolExecutor::new(), 10)
            .await
            .unwrap_or_else(|e| panic!("agentic_loop failed: {e}"));

        assert!(response.content.contains("Python"));
        assert_eq!(request.rounds(), 0);
    }
}
