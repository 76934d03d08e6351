//! Agent configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.
//! A built [`AgentConfig`] is immutable and is passed by reference to
//! whatever needs it; nothing reads it from a global.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AgentError;

/// Default model identifier.
const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default sampling temperature.
const DEFAULT_TEMPERATURE: f32 = 0.2;
/// Default maximum tokens for the final answer.
const DEFAULT_MAX_TOKENS: u32 = 4096;
/// Default maximum tool-calling loop iterations.
const DEFAULT_MAX_TOOL_ITERATIONS: usize = 10;
/// Default time a blocking caller waits for an answer.
const DEFAULT_BRIDGE_TIMEOUT_SECS: u64 = 60;

/// Configuration for the assistant agent and its runtime.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// LLM provider name (e.g., "openai").
    pub provider: String,
    /// API key for the provider.
    pub api_key: String,
    /// Optional base URL override (for proxies or compatible APIs).
    pub base_url: Option<String>,
    /// Model identifier sent with every request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens for each model response.
    pub max_tokens: u32,
    /// Maximum tool-calling loop iterations before aborting.
    pub max_tool_iterations: usize,
    /// How long the sync bridge waits for the agent before giving up.
    pub bridge_timeout: Duration,
    /// File whose contents replace the compiled-in instructions.
    pub instructions_file: Option<PathBuf>,
}

impl AgentConfig {
    /// Creates a new builder for `AgentConfig`.
    #[must_use]
    pub fn builder() -> AgentConfigBuilder {
        AgentConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if no API key is found.
    pub fn from_env() -> Result<Self, AgentError> {
        Self::builder().from_env().build()
    }
}

/// Builder for [`AgentConfig`].
#[derive(Debug, Clone, Default)]
pub struct AgentConfigBuilder {
    provider: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    max_tool_iterations: Option<usize>,
    bridge_timeout: Option<Duration>,
    instructions_file: Option<PathBuf>,
}

impl AgentConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(self) -> Self {
        self.from_lookup(|key| std::env::var(key).ok())
    }

    /// Populates unset fields from `lookup`, which maps a variable name to
    /// its value. [`from_env`](Self::from_env) passes the process environment.
    #[must_use]
    pub fn from_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.provider.is_none() {
            self.provider = lookup("PDF_ASSISTANT_PROVIDER");
        }
        if self.api_key.is_none() {
            self.api_key = lookup("OPENAI_API_KEY")
                .or_else(|| lookup("PDF_ASSISTANT_API_KEY"))
                .or_else(|| lookup("GEMINI_API_KEY"));
        }
        if self.base_url.is_none() {
            self.base_url =
                lookup("OPENAI_BASE_URL").or_else(|| lookup("PDF_ASSISTANT_BASE_URL"));
        }
        if self.model.is_none() {
            self.model = lookup("PDF_ASSISTANT_MODEL");
        }
        if self.temperature.is_none() {
            self.temperature = parse_var(&lookup, "PDF_ASSISTANT_TEMPERATURE");
        }
        if self.max_tokens.is_none() {
            self.max_tokens = parse_var(&lookup, "PDF_ASSISTANT_MAX_TOKENS");
        }
        if self.max_tool_iterations.is_none() {
            self.max_tool_iterations = parse_var(&lookup, "PDF_ASSISTANT_MAX_TOOL_ITERATIONS");
        }
        if self.bridge_timeout.is_none() {
            self.bridge_timeout = parse_var::<u64>(&lookup, "PDF_ASSISTANT_TIMEOUT_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs);
        }
        if self.instructions_file.is_none() {
            self.instructions_file = lookup("PDF_ASSISTANT_INSTRUCTIONS").map(PathBuf::from);
        }
        self
    }

    /// Sets the LLM provider name.
    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL override.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, t: f32) -> Self {
        self.temperature = Some(t);
        self
    }

    /// Sets the response max tokens.
    #[must_use]
    pub const fn max_tokens(mut self, n: u32) -> Self {
        self.max_tokens = Some(n);
        self
    }

    /// Sets the maximum tool-calling loop iterations.
    #[must_use]
    pub const fn max_tool_iterations(mut self, n: usize) -> Self {
        self.max_tool_iterations = Some(n);
        self
    }

    /// Sets the sync bridge timeout.
    #[must_use]
    pub const fn bridge_timeout(mut self, timeout: Duration) -> Self {
        self.bridge_timeout = Some(timeout);
        self
    }

    /// Sets the instructions override file.
    #[must_use]
    pub fn instructions_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.instructions_file = Some(path.into());
        self
    }

    /// Builds the [`AgentConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if no API key was set.
    pub fn build(self) -> Result<AgentConfig, AgentError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(AgentError::ApiKeyMissing)?;

        Ok(AgentConfig {
            provider: self.provider.unwrap_or_else(|| "openai".to_string()),
            api_key,
            base_url: self.base_url,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            max_tool_iterations: self
                .max_tool_iterations
                .unwrap_or(DEFAULT_MAX_TOOL_ITERATIONS),
            bridge_timeout: self
                .bridge_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_BRIDGE_TIMEOUT_SECS)),
            instructions_file: self.instructions_file,
        })
    }
}

/// Parses `key` from `lookup`; missing or malformed values count as unset.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}
