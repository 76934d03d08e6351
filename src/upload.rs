//! Staging of uploaded documents.
//!
//! The agent's tool only understands filesystem paths, so uploaded bytes
//! are written to `<dir>/temp_<name>` before the question is asked. Staged
//! files are left in place; cleanup belongs to whoever owns the directory.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Prefix given to staged upload filenames.
pub const UPLOAD_PREFIX: &str = "temp_";

/// Reduces a client-supplied filename to its final path component.
///
/// Both `/` and `\` count as separators since browsers on Windows may send
/// full paths. Returns `None` when nothing usable remains.
#[must_use]
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}

/// Returns `true` if `filename` ends in `.pdf` (any case).
#[must_use]
pub fn has_pdf_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Writes `bytes` to `dir/temp_<filename>` and returns the path.
///
/// Creates `dir` if needed and overwrites an earlier upload of the same name.
///
/// # Errors
///
/// Returns [`io::ErrorKind::InvalidInput`] for a filename with no usable
/// component, or the underlying error if the directory or file cannot be
/// written.
pub fn stage_upload(dir: &Path, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    let name = sanitize_filename(filename).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unusable upload filename: {filename:?}"),
        )
    })?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{UPLOAD_PREFIX}{name}"));
    std::fs::write(&path, bytes)?;

    debug!(path = %path.display(), bytes = bytes.len(), "staged upload");
    Ok(path)
}
