//! Browser front end: upload a PDF, ask a question, read the answer.
//!
//! # Feature Gate
//!
//! This module requires the `server` feature flag (on by default).

pub mod page;
pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::bridge::SyncBridge;

pub use page::render_page;
pub use routes::{AppState, router};

/// Serves the upload page until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(
    bridge: SyncBridge,
    upload_dir: PathBuf,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let state = AppState {
        bridge: Arc::new(bridge),
        upload_dir: Arc::new(upload_dir),
    };
    let upload_dir = state.upload_dir.display().to_string();

    let addr = format!("{host}:{port}");
    let tcp_listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, upload_dir, "web server listening");

    // stdout stays free for command output
    #[allow(clippy::print_stderr)]
    {
        eprintln!("AI PDF Assistant listening on http://{addr}/");
    }

    axum::serve(tcp_listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
