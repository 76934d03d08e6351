//! PDF text extraction.
//!
//! Opens a PDF, walks its pages in order, and concatenates their plain
//! text with a `--- Page N ---` marker in front of each page. Failures are
//! returned as [`ExtractError`], whose `Display` output is the
//! user-facing message the agent sees when the tool fails.

use std::fmt::Write;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use lopdf::Document;
use thiserror::Error;
use tracing::debug;

/// Prefix that distinguishes tool failures from extracted text.
pub const FAILURE_MARKER: &str = "❌";

/// Reasons a PDF could not be turned into text.
///
/// Every variant renders with a leading [`FAILURE_MARKER`].
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Nothing exists at the path.
    #[error("❌ Error: File not found at {}", .path.display())]
    NotFound {
        /// Requested path.
        path: PathBuf,
    },

    /// The path exists but this process cannot read it as a file.
    #[error("❌ Error: File is not readable at {} ({reason})", .path.display())]
    NotReadable {
        /// Requested path.
        path: PathBuf,
        /// Why the read failed.
        reason: String,
    },

    /// The bytes are not a PDF lopdf can decode, or a page failed to decode.
    #[error("❌ Error reading PDF: {message}")]
    Parse {
        /// Requested path.
        path: PathBuf,
        /// Parser error message.
        message: String,
    },
}

impl ExtractError {
    /// Returns the path the failed extraction was asked to read.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::NotReadable { path, .. } | Self::Parse { path, .. } => {
                path
            }
        }
    }
}

/// Extracts the text of every page of the PDF at `path`, in page order.
///
/// Each page contributes `"\n--- Page N ---\n"` (1-indexed) followed by its
/// text. A valid document with no pages yields an empty string; pages
/// without text yield just their marker.
///
/// The file is opened, read, and closed within this call.
///
/// # Errors
///
/// Returns [`ExtractError::NotFound`] or [`ExtractError::NotReadable`] for
/// access failures and [`ExtractError::Parse`] when the document or one of
/// its pages cannot be decoded.
pub fn extract_text(path: impl AsRef<Path>) -> Result<String, ExtractError> {
    let path = path.as_ref();
    let bytes = read_document_bytes(path)?;

    let doc = Document::load_mem(&bytes).map_err(|e| ExtractError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let pages = doc.get_pages();
    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        pages = pages.len(),
        "loaded PDF"
    );

    let mut text = String::new();
    for &page_number in pages.keys() {
        let page_text = doc
            .extract_text(&[page_number])
            .map_err(|e| ExtractError::Parse {
                path: path.to_path_buf(),
                message: format!("page {page_number}: {e}"),
            })?;
        let _ = write!(text, "\n--- Page {page_number} ---\n{page_text}");
    }

    Ok(text)
}

/// Runs [`extract_text`] and flattens the outcome into the tool's string
/// channel: the text on success, the `❌` message on failure.
#[must_use]
pub fn read_pdf(path: impl AsRef<Path>) -> String {
    extract_text(path).unwrap_or_else(|e| e.to_string())
}

/// Returns `true` if `output` is a failure message rather than text.
#[must_use]
pub fn is_failure(output: &str) -> bool {
    output.starts_with(FAILURE_MARKER)
}

fn read_document_bytes(path: &Path) -> Result<Vec<u8>, ExtractError> {
    let classify = |e: std::io::Error| {
        if e.kind() == ErrorKind::NotFound {
            ExtractError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ExtractError::NotReadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    };

    let metadata = std::fs::metadata(path).map_err(classify)?;
    if metadata.is_dir() {
        return Err(ExtractError::NotReadable {
            path: path.to_path_buf(),
            reason: "is a directory".to_string(),
        });
    }

    std::fs::read(path).map_err(classify)
}
