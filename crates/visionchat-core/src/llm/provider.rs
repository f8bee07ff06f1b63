//! MultimodalProvider trait definition.

use visionchat_types::llm::{GenerationRequest, GenerationResponse, LlmError};

/// A hosted model that accepts text plus inline media and returns text.
///
/// Uses native async fn in traits (RPITIT). Implementations live in
/// visionchat-infra (e.g. `GeminiProvider`).
pub trait MultimodalProvider: Send + Sync {
    /// Provider identifier (e.g. "gemini").
    fn name(&self) -> &str;

    /// Model identifier every request is sent to.
    fn model(&self) -> &str;

    /// Send one generation request and wait for the full response.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<GenerationResponse, LlmError>> + Send;
}
