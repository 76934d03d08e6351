//! Assistant instructions and the per-turn agent input.
//!
//! The instructions are compiled in and can be replaced by a user file.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Default system instructions for the PDF assistant.
pub const DEFAULT_INSTRUCTIONS: &str = "You're an AI assistant that analyzes PDF documents. \
You are given a question followed by the path to a PDF file, separated by a comma.\n\
1. Use `read_pdf` to load files, passing the file path as a string.\n\
2. Answer with headings, structure, and emojis.\n\
3. Detect and present questions/MCQs if any.\n\
If `read_pdf` returns a message starting with ❌, tell the user what went wrong \
instead of answering from memory.";

/// Instructions file looked up under the user's config directory.
const INSTRUCTIONS_FILENAME: &str = "instructions.md";
/// Application directory name under the config directory.
const APP_DIR: &str = "pdf-assistant";

/// Loads the assistant instructions, falling back to [`DEFAULT_INSTRUCTIONS`].
///
/// Resolution order:
/// 1. `explicit` (from `--instructions` or config)
/// 2. `PDF_ASSISTANT_INSTRUCTIONS` environment variable
/// 3. `<config dir>/pdf-assistant/instructions.md`
///
/// The first candidate that exists is used. A file that exists but cannot be
/// read, or is blank, falls through to the default with a warning.
#[must_use]
pub fn load_instructions(explicit: Option<&Path>) -> String {
    let candidate = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os("PDF_ASSISTANT_INSTRUCTIONS").map(PathBuf::from))
        .or_else(default_instructions_path)
        .filter(|p| p.exists());

    let Some(path) = candidate else {
        return DEFAULT_INSTRUCTIONS.to_string();
    };

    match std::fs::read_to_string(&path) {
        Ok(text) if !text.trim().is_empty() => {
            debug!(path = %path.display(), "loaded instructions override");
            text
        }
        Ok(_) => {
            warn!(path = %path.display(), "instructions file is empty, using defaults");
            DEFAULT_INSTRUCTIONS.to_string()
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "cannot read instructions file, using defaults"
            );
            DEFAULT_INSTRUCTIONS.to_string()
        }
    }
}

/// Default location of the instructions override file.
#[must_use]
pub fn default_instructions_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(INSTRUCTIONS_FILENAME))
}

/// Builds the single user message for one turn: `"{question},{path}"`.
///
/// The model splits the two on the last comma by convention only, so a path
/// that itself contains a comma is ambiguous. That case is logged.
#[must_use]
pub fn build_agent_input(question: &str, pdf_path: &Path) -> String {
    let path = pdf_path.to_string_lossy();
    if path.contains(',') {
        warn!(path = %path, "PDF path contains a comma; the model may misread it");
    }
    format!("{question},{path}")
}
