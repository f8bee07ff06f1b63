//! Application state shared by the CLI commands and the HTTP handlers.

use std::sync::Arc;

use visionchat_core::llm::box_provider::BoxMultimodalProvider;
use visionchat_core::video::assistant::{AssistantOptions, VideoAssistant};
use visionchat_infra::llm::{create_provider, resolve_api_key};
use visionchat_types::config::GlobalConfig;

/// The assistant pinned to the runtime-selected provider.
pub type ConcreteAssistant = VideoAssistant<BoxMultimodalProvider>;

/// Immutable state cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<ConcreteAssistant>,
    pub config: Arc<GlobalConfig>,
}

impl AppState {
    /// Wire the configured provider. Fails when the API key is missing.
    pub fn from_config(config: GlobalConfig) -> anyhow::Result<Self> {
        let env_var = &config.model.api_key_env;
        let api_key = resolve_api_key(env_var).ok_or_else(|| {
            anyhow::anyhow!("{env_var} is not set. Export your Gemini API key: export {env_var}=...")
        })?;
        let provider = create_provider(&config.model, api_key)?;
        tracing::debug!(provider = %config.model.provider, model = %config.model.model, "provider ready");
        Ok(Self::new(provider, config))
    }

    pub fn new(provider: BoxMultimodalProvider, config: GlobalConfig) -> Self {
        let options = AssistantOptions {
            temperature: config.model.temperature,
        };
        Self {
            assistant: Arc::new(VideoAssistant::new(provider, options)),
            config: Arc::new(config),
        }
    }
}
