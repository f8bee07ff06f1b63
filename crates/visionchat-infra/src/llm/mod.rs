//! Multimodal provider implementations.
//!
//! Provides the Gemini provider, a factory ([`create_provider`]) that builds
//! the configured provider, and API key resolution from the environment.

pub mod gemini;

use std::time::Duration;

use secrecy::SecretString;

use visionchat_core::llm::box_provider::BoxMultimodalProvider;
use visionchat_types::config::ModelConfig;
use visionchat_types::llm::{LlmError, ProviderType};

use self::gemini::GeminiProvider;

/// Create a [`BoxMultimodalProvider`] from the model configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn create_provider(
    config: &ModelConfig,
    api_key: SecretString,
) -> Result<BoxMultimodalProvider, LlmError> {
    match config.provider {
        ProviderType::Gemini => {
            let provider = GeminiProvider::new(
                api_key,
                config.model.clone(),
                config.base_url.clone(),
                config.request_timeout_secs.map(Duration::from_secs),
            )?;
            Ok(BoxMultimodalProvider::new(provider))
        }
    }
}

/// Read the API key from the environment variable named `var`.
///
/// Unset, non-Unicode and blank values all count as missing.
pub fn resolve_api_key(var: &str) -> Option<SecretString> {
    api_key_from(std::env::var(var).ok())
}

fn api_key_from(value: Option<String>) -> Option<SecretString> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}
