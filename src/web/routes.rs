//! HTTP routes for the upload page.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::multipart::Multipart;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tracing::{info, warn};

use super::page::{Exchange, render_page};
use crate::bridge::SyncBridge;
use crate::pdf::FAILURE_MARKER;
use crate::upload::{has_pdf_extension, sanitize_filename, stage_upload};

/// Largest accepted request body.
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Shared state for all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Runs the assistant.
    pub bridge: Arc<SyncBridge>,
    /// Directory uploads are staged into.
    pub upload_dir: Arc<PathBuf>,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ask", get(index).post(ask))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(render_page(None, None))
}

async fn health() -> &'static str {
    "ok"
}

/// Fields read from the `/ask` form.
#[derive(Debug, Default)]
struct AskForm {
    filename: Option<String>,
    bytes: Vec<u8>,
    question: String,
}

async fn read_form(multipart: &mut Multipart) -> Result<AskForm, String> {
    let mut form = AskForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Malformed upload: {e}"))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("file") => {
                form.filename = field.file_name().map(ToString::to_string);
                form.bytes = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Could not read upload: {e}"))?
                    .to_vec();
            }
            Some("question") => {
                form.question = field
                    .text()
                    .await
                    .map_err(|e| format!("Could not read question: {e}"))?;
            }
            _ => {}
        }
    }
    Ok(form)
}

fn bad_request(notice: &str) -> Response {
    (StatusCode::BAD_REQUEST, Html(render_page(Some(notice), None))).into_response()
}

async fn ask(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(notice) => return bad_request(&notice),
    };

    let question = form.question.trim().to_string();
    let Some(filename) = form.filename.as_deref().and_then(sanitize_filename) else {
        return bad_request("Please upload a PDF file.");
    };
    if question.is_empty() {
        return bad_request("Please enter a question about the PDF.");
    }
    if !has_pdf_extension(&filename) {
        return bad_request("Only .pdf files are accepted.");
    }

    info!(file = filename, bytes = form.bytes.len(), "received upload");

    let bridge = Arc::clone(&state.bridge);
    let upload_dir = Arc::clone(&state.upload_dir);
    let bytes = form.bytes;
    let q = question.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let path = stage_upload(&upload_dir, &filename, &bytes)
            .map_err(|e| format!("Could not save upload: {e}"))?;
        bridge.ask(&q, &path).map_err(|e| e.to_string())
    })
    .await;

    let answer = match outcome {
        Ok(Ok(answer)) => answer,
        Ok(Err(message)) => {
            warn!(error = message, "question failed");
            format!("{FAILURE_MARKER} {message}")
        }
        Err(e) => {
            warn!(error = %e, "answer task failed");
            format!("{FAILURE_MARKER} internal error")
        }
    };

    let exchange = Exchange {
        question: &question,
        answer: &answer,
    };
    Html(render_page(None, Some(&exchange))).into_response()
}
