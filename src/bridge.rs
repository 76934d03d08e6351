//! Blocking entry point to the async agent.
//!
//! Every call runs the agent on a dedicated worker thread that owns a fresh
//! single-threaded tokio runtime. The caller blocks on a channel with a
//! deadline. This behaves the same whether or not the caller is itself
//! inside a tokio runtime, so CLI code, `spawn_blocking` closures and tests
//! all use one code path.

use std::fmt;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::agent::{
    Agent, AgentConfig, LlmProvider, PdfAssistantAgent, ToolExecutor, build_agent_input,
    create_provider, execute_with_tools,
};
use crate::error::{AgentError, BridgeError};

/// Name given to agent worker threads.
const WORKER_THREAD_NAME: &str = "pdf-assistant-agent";

/// Runs the PDF assistant synchronously with a timeout.
///
/// Cheap to clone; clones share the provider and agent.
#[derive(Clone)]
pub struct SyncBridge {
    provider: Arc<dyn LlmProvider>,
    agent: Arc<dyn Agent>,
    executor: ToolExecutor,
    timeout: Duration,
}

impl fmt::Debug for SyncBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncBridge")
            .field("provider", &self.provider.name())
            .field("agent", &self.agent.name())
            .field("model", &self.agent.model())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SyncBridge {
    /// Creates a bridge from its parts.
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, agent: Arc<dyn Agent>, timeout: Duration) -> Self {
        Self {
            provider,
            agent,
            executor: ToolExecutor::new(),
            timeout,
        }
    }

    /// Creates the provider and [`PdfAssistantAgent`] described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnsupportedProvider`] for an unknown provider.
    pub fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let provider = create_provider(config)?;
        let agent = Arc::new(PdfAssistantAgent::from_config(config));
        Ok(Self::new(provider, agent, config.bridge_timeout))
    }

    /// Returns a copy of this bridge with a different timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The time [`ask`](Self::ask) waits before giving up.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Asks `question` about the PDF at `pdf_path` and blocks for the answer.
    ///
    /// The path is not checked here; an unreadable file surfaces through the
    /// `read_pdf` tool and the model reports it.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::Agent`] for an empty question or a failed agent run
    /// - [`BridgeError::Timeout`] if no answer arrives within the timeout
    /// - [`BridgeError::WorkerSpawn`], [`BridgeError::Runtime`] or
    ///   [`BridgeError::WorkerPanicked`] if the worker could not run
    pub fn ask(&self, question: &str, pdf_path: &Path) -> Result<String, BridgeError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AgentError::InvalidInput {
                message: "question must not be empty".to_string(),
            }
            .into());
        }

        let input = build_agent_input(question, pdf_path);
        let provider = Arc::clone(&self.provider);
        let agent = Arc::clone(&self.agent);
        let executor = self.executor;

        info!(
            agent = agent.name(),
            path = %pdf_path.display(),
            timeout_secs = self.timeout.as_secs_f64(),
            "running agent"
        );

        let started = Instant::now();
        let response = run_blocking(self.timeout, move || async move {
            execute_with_tools(agent.as_ref(), provider.as_ref(), &input, &executor).await
        })?;

        debug!(
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            total_tokens = response.usage.total_tokens,
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            "agent finished"
        );
        Ok(response.content)
    }
}

/// Runs the future produced by `make` on a new worker thread and waits at
/// most `timeout` for its output.
///
/// The future is built on the worker, so it need not be `Send`. The worker
/// stops its own future at the same deadline, so a timed-out run does not
/// linger.
///
/// # Errors
///
/// See [`SyncBridge::ask`].
pub fn run_blocking<F, Fut, T>(timeout: Duration, make: F) -> Result<T, BridgeError>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, AgentError>>,
    T: Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(1);

    thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || {
            let result = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| BridgeError::Runtime {
                    message: e.to_string(),
                })
                .and_then(|rt| {
                    rt.block_on(async { tokio::time::timeout(timeout, make()).await })
                        .map_err(|_| BridgeError::Timeout { timeout })?
                        .map_err(BridgeError::from)
                });
            // The caller may have stopped waiting.
            let _ = tx.send(result);
        })
        .map_err(BridgeError::WorkerSpawn)?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            warn!(timeout_secs = timeout.as_secs_f64(), "agent run timed out");
            Err(BridgeError::Timeout { timeout })
        }
        Err(RecvTimeoutError::Disconnected) => Err(BridgeError::WorkerPanicked),
    }
}
