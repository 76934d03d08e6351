//! Tool type definitions for function-calling.
//!
//! Provides provider-agnostic types for tool definitions, calls, and results.
//! The assistant has exactly one tool, `read_pdf`, which exposes
//! [`crate::pdf::read_pdf`] to the model.

use serde_json::json;

/// Name of the PDF text-extraction tool.
pub const READ_PDF: &str = "read_pdf";

/// A tool definition that can be sent to an LLM for function-calling.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Tool name (must match dispatch table in executor).
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema object describing the tool's parameters.
    pub parameters: serde_json::Value,
}

/// A tool call requested by the LLM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    /// Unique identifier for this call (assigned by the provider).
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON-encoded arguments for the tool.
    pub arguments: String,
}

/// The result of executing a tool call.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// ID of the tool call this result corresponds to.
    pub tool_call_id: String,
    /// Extracted text on success, `❌`-prefixed message on failure.
    pub content: String,
    /// Whether this result represents an error.
    pub is_error: bool,
}

/// A set of tool definitions scoped to an agent.
#[derive(Debug, Clone)]
pub struct ToolSet {
    definitions: Vec<ToolDefinition>,
}

impl ToolSet {
    /// Returns the tool definitions in this set.
    #[must_use]
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Tool set for the PDF assistant: just `read_pdf`.
    #[must_use]
    pub fn pdf_tools() -> Self {
        Self {
            definitions: vec![def_read_pdf()],
        }
    }
}

/// Defines the `read_pdf` tool.
fn def_read_pdf() -> ToolDefinition {
    ToolDefinition {
        name: READ_PDF.to_string(),
        description: "Read a PDF file and return the text of every page in order, each page \
                       preceded by a '--- Page N ---' marker. Returns a message starting with \
                       '❌' if the file is missing, unreadable, or not a valid PDF."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Filesystem path of the PDF to read."
                }
            },
            "required": ["file_path"],
            "additionalProperties": false
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_tools_offers_only_read_pdf() {
        let names: Vec<_> = ToolSet::pdf_tools()
            .definitions()
            .iter()
            .map(|d| d.name.clone())
            .collect();
        assert_eq!(names, vec![READ_PDF.to_string()]);
    }

    #[test]
    fn test_read_pdf_schema() {
        let def = def_read_pdf();
        assert_eq!(def.parameters["type"], "object");
        assert_eq!(def.parameters["required"][0], "file_path");
        assert_eq!(def.parameters["properties"]["file_path"]["type"], "string");
        assert_eq!(def.parameters["additionalProperties"], false);
    }

    #[test]
    fn test_description_mentions_failure_marker() {
        assert!(def_read_pdf().description.contains('❌'));
        assert!(def_read_pdf().description.contains("--- Page N ---"));
    }
}
