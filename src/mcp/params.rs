//! MCP tool parameter types.
//!
//! `schemars` derives the JSON Schemas the MCP protocol advertises.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `read_pdf` MCP tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadPdfParams {
    /// Filesystem path of the PDF to read.
    #[serde(alias = "file_path_str")]
    pub file_path: String,
}

/// Parameters for the `ask_pdf` MCP tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AskPdfParams {
    /// Question about the document.
    pub question: String,

    /// Filesystem path of the PDF.
    pub file_path: String,
}
