//! Output formatting for CLI commands.

use serde::Serialize;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text for humans.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Parses a `--format` value. Unknown values fall back to text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Serializes `value` as pretty JSON.
    ///
    /// Serialization of the crate's own output types cannot fail; if it
    /// somehow does, the error is reported as a JSON object.
    #[must_use]
    pub fn to_json<T: Serialize + ?Sized>(self, value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|e| {
            serde_json::json!({ "error": format!("serialization failed: {e}") }).to_string()
        })
    }
}

/// JSON shape of `extract` output.
#[derive(Debug, Serialize)]
pub struct ExtractOutput<'a> {
    /// Whether extraction succeeded.
    pub ok: bool,
    /// Path as given on the command line.
    pub file: &'a str,
    /// Extracted text on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    /// `❌` message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// JSON shape of `ask` output.
#[derive(Debug, Serialize)]
pub struct AskOutput<'a> {
    /// The question asked.
    pub question: &'a str,
    /// Path of the PDF.
    pub file: &'a str,
    /// The assistant's answer.
    pub answer: &'a str,
}
