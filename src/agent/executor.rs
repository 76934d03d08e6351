//! Tool executor that dispatches tool calls to internal functions.
//!
//! Maps tool names to direct Rust function calls. Every outcome, including
//! malformed arguments and unknown tools, comes back as a [`ToolResult`]
//! so the model always gets an answer to its call.

use serde::Deserialize;
use tracing::debug;

use crate::error::AgentError;
use crate::pdf;

use super::tool::{READ_PDF, ToolCall, ToolResult};

/// Maximum raw byte length of tool argument JSON from the LLM.
const MAX_TOOL_ARGS_LEN: usize = 16_384;

/// Executes tool calls on behalf of the agent loop.
///
/// Holds no state; each `read_pdf` call opens and closes its file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolExecutor;

impl ToolExecutor {
    /// Creates a new executor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Dispatches a tool call to the appropriate internal function.
    ///
    /// Validates raw argument size before dispatch to prevent oversized payloads.
    #[must_use]
    pub fn execute(&self, call: &ToolCall) -> ToolResult {
        if call.arguments.len() > MAX_TOOL_ARGS_LEN {
            return ToolResult {
                tool_call_id: call.id.clone(),
                content: format!(
                    "{} tool arguments too large ({} bytes, max {MAX_TOOL_ARGS_LEN})",
                    pdf::FAILURE_MARKER,
                    call.arguments.len()
                ),
                is_error: true,
            };
        }

        let result = match call.name.as_str() {
            READ_PDF => Self::tool_read_pdf(&call.arguments),
            other => Err(AgentError::ToolExecution {
                name: other.to_string(),
                message: "unknown tool".to_string(),
            }),
        };

        match result {
            Ok(content) => ToolResult {
                tool_call_id: call.id.clone(),
                is_error: pdf::is_failure(&content),
                content,
            },
            Err(e) => ToolResult {
                tool_call_id: call.id.clone(),
                content: format!("{} {e}", pdf::FAILURE_MARKER),
                is_error: true,
            },
        }
    }

    /// Extracts the text of the PDF named in the arguments.
    ///
    /// Extraction failures are not errors here: their `❌` message is the
    /// tool's output.
    fn tool_read_pdf(args: &str) -> Result<String, AgentError> {
        #[derive(Deserialize)]
        struct Args {
            #[serde(alias = "file_path_str", alias = "path")]
            file_path: String,
        }
        let args: Args = serde_json::from_str(args).map_err(|e| AgentError::ToolExecution {
            name: READ_PDF.to_string(),
            message: format!("invalid arguments: {e}"),
        })?;

        let output = pdf::read_pdf(args.file_path.trim());
        debug!(
            path = args.file_path,
            chars = output.len(),
            failed = pdf::is_failure(&output),
            "read_pdf executed"
        );
        Ok(output)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::write_pdf;
    use tempfile::TempDir;

    fn call(name: &str, arguments: String) -> ToolCall {
        ToolCall {
            id: "call_1".to_string(),
            name: name.to_string(),
            arguments,
        }
    }

    #[test]
    fn test_read_pdf_success() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = dir.path().join("guide.pdf");
        write_pdf(&path, &["Introduction to Python"]);

        let args = serde_json::json!({ "file_path": path }).to_string();
        let result = ToolExecutor::new().execute(&call(READ_PDF, args));

        assert!(!result.is_error, "Expected success, got: {}", result.content);
        assert_eq!(result.tool_call_id, "call_1");
        assert!(result.content.contains("--- Page 1 ---"));
        assert!(result.content.contains("Introduction"));
    }

    #[test]
    fn test_read_pdf_accepts_legacy_argument_name() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = dir.path().join("legacy.pdf");
        write_pdf(&path, &["legacy"]);

        let args = serde_json::json!({ "file_path_str": path }).to_string();
        let result = ToolExecutor::new().execute(&call(READ_PDF, args));
        assert!(!result.is_error, "{}", result.content);
    }

    #[test]
    fn test_read_pdf_missing_file_is_error_text() {
        let args = r#"{"file_path":"/definitely/not/here.pdf"}"#.to_string();
        let result = ToolExecutor::new().execute(&call(READ_PDF, args));

        assert!(result.is_error);
        assert!(result.content.starts_with(pdf::FAILURE_MARKER));
        assert!(result.content.contains("not found"));
    }

    #[test]
    fn test_read_pdf_invalid_arguments() {
        let result = ToolExecutor::new().execute(&call(READ_PDF, r#"{"pages":[1]}"#.into()));
        assert!(result.is_error);
        assert!(result.content.contains("invalid arguments"));
    }

    #[test]
    fn test_oversized_arguments() {
        let huge = format!(r#"{{"file_path":"{}"}}"#, "a".repeat(MAX_TOOL_ARGS_LEN));
        let result = ToolExecutor::new().execute(&call(READ_PDF, huge));
        assert!(result.is_error);
        assert!(result.content.contains("too large"));
    }

    #[test]
    fn test_unknown_tool() {
        let result = ToolExecutor::new().execute(&call("search", "{}".to_string()));
        assert!(result.is_error);
        assert!(result.content.contains("unknown tool"));
    }
}
