//! MCP transport layer for stdio and streamable HTTP.

use std::sync::Arc;

use rmcp::ServiceExt;
use rmcp::transport::io::stdio;
use tracing::info;

use super::server::PdfAssistantMcpServer;

/// Starts the MCP server on stdin/stdout.
///
/// # Errors
///
/// Returns an error if the server fails to start or encounters a runtime error.
pub async fn serve_stdio(server: PdfAssistantMcpServer) -> anyhow::Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

/// Starts the MCP server with streamable HTTP transport at `/mcp`.
///
/// Every session gets its own server instance sharing one bridge.
///
/// # Errors
///
/// Returns an error if the server fails to bind or encounters a runtime error.
pub async fn serve_sse(server: PdfAssistantMcpServer, host: &str, port: u16) -> anyhow::Result<()> {
    use rmcp::transport::streamable_http_server::{
        StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
    };

    let ct = tokio_util::sync::CancellationToken::new();
    let bridge = Arc::clone(server.bridge());

    let service = StreamableHttpService::new(
        move || Ok(PdfAssistantMcpServer::from_shared(Arc::clone(&bridge))),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            cancellation_token: ct.child_token(),
            ..Default::default()
        },
    );

    let router = axum::Router::new().nest_service("/mcp", service);
    let addr = format!("{host}:{port}");
    let tcp_listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "mcp server listening");

    // stdout is reserved for MCP protocol messages
    #[allow(clippy::print_stderr)]
    {
        eprintln!("pdf-assistant MCP server listening on http://{addr}/mcp");
    }

    axum::serve(tcp_listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            ct.cancel();
        })
        .await?;

    Ok(())
}
