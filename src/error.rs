//! Error types for pdf-assistant.
//!
//! Each concern gets its own `thiserror` enum; [`Error`] unifies them for
//! the command layer. Extraction failures live in [`crate::pdf::ExtractError`]
//! and never reach [`Error`]: every caller flattens them into the `❌` text
//! shown to the user or the model.

use std::time::Duration;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Agent configuration, provider, or tool-loop failure.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// Failure while bridging a blocking caller to the agent run.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// CLI command failure.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the agent layer.
#[derive(Debug, Error)]
pub enum AgentError {
    /// No API key was supplied explicitly or through the environment.
    #[error("API key missing: set OPENAI_API_KEY, PDF_ASSISTANT_API_KEY or GEMINI_API_KEY")]
    ApiKeyMissing,

    /// The configured provider name has no implementation.
    #[error("unsupported provider: {name}")]
    UnsupportedProvider {
        /// Provider name as configured.
        name: String,
    },

    /// The provider API call failed.
    #[error("API request failed: {message}")]
    ApiRequest {
        /// Error message from the SDK or transport.
        message: String,
        /// HTTP status, when known.
        status: Option<u16>,
    },

    /// A tool call could not be executed.
    #[error("tool '{name}' failed: {message}")]
    ToolExecution {
        /// Tool name.
        name: String,
        /// Failure detail.
        message: String,
    },

    /// The model kept requesting tools past the iteration limit.
    #[error("tool loop exceeded {max_iterations} iterations without a final answer")]
    ToolLoopExceeded {
        /// Configured iteration limit.
        max_iterations: usize,
    },

    /// The caller supplied unusable input (empty question, missing path).
    #[error("invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input.
        message: String,
    },
}

/// Errors raised by the sync bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The agent run did not finish within the bridge timeout.
    #[error("request did not complete within {}s", .timeout.as_secs_f64())]
    Timeout {
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// The worker's async runtime could not be built.
    #[error("failed to create async runtime: {message}")]
    Runtime {
        /// Underlying error message.
        message: String,
    },

    /// The worker thread could not be spawned.
    #[error("failed to spawn agent worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// The worker thread ended without sending a result.
    #[error("agent worker thread terminated without a result")]
    WorkerPanicked,

    /// The agent run itself failed.
    #[error(transparent)]
    Agent(#[from] AgentError),
}

/// Errors raised by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command could not complete.
    #[error("{0}")]
    ExecutionFailed(String),
}
