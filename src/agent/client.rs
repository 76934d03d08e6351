//! Provider registry and factory.
//!
//! Maps provider names to concrete [`LlmProvider`] implementations.

use std::sync::Arc;

use crate::agent::config::AgentConfig;
use crate::agent::providers::{LlmProvider, OpenAiProvider};
use crate::error::AgentError;

/// Gemini's OpenAI-compatible endpoint, used when `provider = "gemini"`
/// and no base URL is configured.
pub const GEMINI_OPENAI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Creates an [`LlmProvider`] based on the configured provider name.
///
/// # Supported Providers
///
/// - `"openai"` (default): OpenAI-compatible APIs via `async-openai`
/// - `"gemini"`: the same client pointed at [`GEMINI_OPENAI_BASE_URL`]
///   unless `base_url` overrides it
///
/// The provider is shared, so the same instance can serve every request
/// of a long-running server.
///
/// # Errors
///
/// Returns [`AgentError::UnsupportedProvider`] for unknown provider names.
pub fn create_provider(config: &AgentConfig) -> Result<Arc<dyn LlmProvider>, AgentError> {
    match config.provider.to_ascii_lowercase().as_str() {
        "openai" => Ok(Arc::new(OpenAiProvider::new(config))),
        "gemini" => {
            let mut config = config.clone();
            config
                .base_url
                .get_or_insert_with(|| GEMINI_OPENAI_BASE_URL.to_string());
            Ok(Arc::new(OpenAiProvider::new(&config)))
        }
        other => Err(AgentError::UnsupportedProvider {
            name: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("openai"; "openai")]
    #[test_case("OpenAI"; "mixed case")]
    #[test_case("gemini"; "gemini")]
    fn test_known_providers(name: &str) {
        let config = AgentConfig::builder()
            .api_key("test")
            .provider(name)
            .build()
            .unwrap_or_else(|_| unreachable!());
        let provider = create_provider(&config).unwrap_or_else(|_| unreachable!());
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_unknown_provider() {
        let config = AgentConfig::builder()
            .api_key("test")
            .provider("anthropic")
            .build()
            .unwrap_or_else(|_| unreachable!());
        let result = create_provider(&config);
        assert!(matches!(
            result,
            Err(AgentError::UnsupportedProvider { ref name }) if name == "anthropic"
        ));
    }
}
