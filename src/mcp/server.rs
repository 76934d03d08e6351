//! MCP server implementation for pdf-assistant.
//!
//! Both tools block (file I/O, or a full agent run through [`SyncBridge`]),
//! so each call moves onto `spawn_blocking`.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use tracing::debug;

use crate::bridge::SyncBridge;
use crate::pdf;

use super::params::{AskPdfParams, ReadPdfParams};

/// pdf-assistant MCP server.
#[derive(Clone)]
pub struct PdfAssistantMcpServer {
    tool_router: ToolRouter<Self>,
    bridge: Arc<SyncBridge>,
}

#[tool_router]
impl PdfAssistantMcpServer {
    /// Extract the text of a PDF, page by page.
    #[tool(
        name = "read_pdf",
        description = "Read a PDF file and return the text of every page in order, each page preceded by a '--- Page N ---' marker. If the file is missing, unreadable, or not a valid PDF, returns a message starting with '❌' instead."
    )]
    async fn read_pdf(
        &self,
        Parameters(params): Parameters<ReadPdfParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = PathBuf::from(params.file_path.trim());
        let text = tokio::task::spawn_blocking(move || pdf::read_pdf(&path))
            .await
            .map_err(|e| McpError::internal_error(format!("Task join error: {e}"), None))?;

        debug!(chars = text.len(), failed = pdf::is_failure(&text), "mcp read_pdf");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Answer a question about a PDF with the assistant agent.
    #[tool(
        name = "ask_pdf",
        description = "Ask the PDF assistant a question about a PDF file. The assistant reads the document and answers with headings and structure, presenting any questions or MCQs it finds."
    )]
    async fn ask_pdf(
        &self,
        Parameters(params): Parameters<AskPdfParams>,
    ) -> Result<CallToolResult, McpError> {
        if params.question.trim().is_empty() {
            return Err(McpError::invalid_params("question must not be empty", None));
        }

        let bridge = Arc::clone(&self.bridge);
        let answer = tokio::task::spawn_blocking(move || {
            bridge.ask(&params.question, PathBuf::from(params.file_path.trim()).as_path())
        })
        .await
        .map_err(|e| McpError::internal_error(format!("Task join error: {e}"), None))?
        .map_err(|e| McpError::internal_error(format!("Assistant failed: {e}"), None))?;

        Ok(CallToolResult::success(vec![Content::text(answer)]))
    }
}

#[tool_handler]
impl ServerHandler for PdfAssistantMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "pdf-assistant".to_string(),
                title: Some("AI PDF Assistant".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Use `read_pdf` to get the raw page text of a PDF, or `ask_pdf` to have the \
                 assistant answer a question about it."
                    .to_string(),
            ),
        }
    }
}

impl PdfAssistantMcpServer {
    /// Creates a server backed by `bridge`.
    #[must_use]
    pub fn new(bridge: SyncBridge) -> Self {
        Self::from_shared(Arc::new(bridge))
    }

    /// Creates a server sharing an existing bridge.
    #[must_use]
    pub fn from_shared(bridge: Arc<SyncBridge>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            bridge,
        }
    }

    /// The bridge answering `ask_pdf`.
    #[must_use]
    pub fn bridge(&self) -> &Arc<SyncBridge> {
        &self.bridge
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::agent::agentic_loop::tests::MockToolProvider;
    use crate::agent::{AgentConfig, PdfAssistantAgent};
    use crate::pdf::fixtures::write_pdf;

    use std::time::Duration;

    use tempfile::TempDir;

    fn server(provider: MockToolProvider) -> PdfAssistantMcpServer {
        let config = AgentConfig::builder()
            .api_key("k")
            .build()
            .unwrap_or_else(|e| panic!("config: {e}"));
        PdfAssistantMcpServer::new(SyncBridge::new(
            Arc::new(provider),
            Arc::new(PdfAssistantAgent::with_default_instructions(&config)),
            Duration::from_secs(10),
        ))
    }

    fn json(result: &CallToolResult) -> String {
        serde_json::to_string(result).unwrap_or_else(|e| panic!("serialize: {e}"))
    }

    #[test]
    fn test_exposes_two_tools() {
        let mut names: Vec<String> = PdfAssistantMcpServer::tool_router()
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["ask_pdf", "read_pdf"]);
    }

    #[test]
    fn test_server_info() {
        let info = server(MockToolProvider::new(0, "")).get_info();
        assert_eq!(info.server_info.name, "pdf-assistant");
        assert!(info.capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn test_read_pdf_tool() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = dir.path().join("doc.pdf");
        write_pdf(&path, &["Chapter one"]);

        let result = server(MockToolProvider::new(0, ""))
            .read_pdf(Parameters(ReadPdfParams {
                file_path: path.to_string_lossy().into_owned(),
            }))
            .await
            .unwrap_or_else(|e| panic!("read_pdf: {e:?}"));
        let body = json(&result);
        assert!(body.contains("--- Page 1 ---"));
        assert!(body.contains("Chapter"));
    }

    #[tokio::test]
    async fn test_read_pdf_tool_missing_file_is_text() {
        let result = server(MockToolProvider::new(0, ""))
            .read_pdf(Parameters(ReadPdfParams {
                file_path: "/no/such/file.pdf".to_string(),
            }))
            .await
            .unwrap_or_else(|e| panic!("read_pdf: {e:?}"));
        assert!(json(&result).contains("❌ Error: File not found"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_ask_pdf_tool() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = dir.path().join("doc.pdf");
        write_pdf(&path, &["Chapter one"]);

        let result = server(MockToolProvider::new(1, path.to_string_lossy()))
            .ask_pdf(Parameters(AskPdfParams {
                question: "Summarize".to_string(),
                file_path: path.to_string_lossy().into_owned(),
            }))
            .await
            .unwrap_or_else(|e| panic!("ask_pdf: {e:?}"));
        assert!(json(&result).contains("Summary"));
    }

    #[tokio::test]
    async fn test_ask_pdf_rejects_empty_question() {
        let result = server(MockToolProvider::new(0, ""))
            .ask_pdf(Parameters(AskPdfParams {
                question: " ".to_string(),
                file_path: "/tmp/x.pdf".to_string(),
            }))
            .await;
        assert!(result.is_err());
    }
}
