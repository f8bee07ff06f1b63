//! GeminiProvider -- concrete [`MultimodalProvider`] for Google Gemini.
//!
//! Sends one `generateContent` request per call with the video as an
//! `inlineData` part, and asks for JSON output matching the request's schema.
//!
//! The API key is wrapped in [`SecretString`] and only exposed when building
//! the `x-goog-api-key` header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use visionchat_core::llm::provider::MultimodalProvider;
use visionchat_observe::genai_attrs::PROVIDER_GEMINI;
use visionchat_types::llm::{ContentPart, GenerationRequest, GenerationResponse, LlmError, Usage};

use super::types::{
    GeminiContent, GeminiErrorEnvelope, GeminiPart, GeminiRequest, GeminiResponse,
    GenerationConfig, InlineData,
};

/// Google Gemini provider. Deliberately not `Debug`.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";

    /// Create a new Gemini provider.
    ///
    /// `timeout` of `None` keeps the HTTP client's default (no timeout).
    pub fn new(
        api_key: SecretString,
        model: String,
        base_url: String,
        timeout: Option<Duration>,
    ) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| LlmError::Provider {
            message: format!("failed to create HTTP client: {e}"),
        })?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Convert a generic [`GenerationRequest`] into a [`GeminiRequest`].
    fn to_gemini_request(request: &GenerationRequest) -> GeminiRequest {
        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                ContentPart::Text { text } => GeminiPart::Text { text: text.clone() },
                ContentPart::InlineMedia { mime_type, data } => GeminiPart::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.clone(),
                        data: data.clone(),
                    },
                },
            })
            .collect();

        let generation_config = match (&request.output_schema, request.temperature) {
            (None, None) => None,
            (schema, temperature) => Some(GenerationConfig {
                response_mime_type: schema.as_ref().map(|_| "application/json".to_string()),
                response_json_schema: schema.as_ref().map(|s| s.schema.clone()),
                temperature,
            }),
        };

        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts,
            }],
            generation_config,
        }
    }

    /// Map a non-success status and its body to an [`LlmError`].
    fn error_for_status(status: reqwest::StatusCode, body: &str) -> LlmError {
        let message = serde_json::from_str::<GeminiErrorEnvelope>(body)
            .map(|env| match env.error.status {
                Some(code) => format!("{code}: {}", env.error.message),
                None => env.error.message,
            })
            .unwrap_or_else(|_| body.to_string());

        match status.as_u16() {
            400 => LlmError::InvalidRequest(message),
            401 | 403 => LlmError::AuthenticationFailed,
            429 => LlmError::RateLimited,
            _ => LlmError::Provider {
                message: format!("HTTP {status}: {message}"),
            },
        }
    }

    /// Extract the answer text from a successful response.
    fn from_gemini_response(
        response: GeminiResponse,
        model: &str,
    ) -> Result<GenerationResponse, LlmError> {
        let usage = response.usage_metadata.unwrap_or_default();

        let Some(candidate) = response.candidates.into_iter().next() else {
            return Err(match response.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => LlmError::Blocked(reason),
                None => LlmError::EmptyResponse,
            });
        };

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(match candidate.finish_reason.as_deref() {
                Some(reason @ ("SAFETY" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "RECITATION")) => {
                    LlmError::Blocked(reason.to_string())
                }
                _ => LlmError::EmptyResponse,
            });
        }

        Ok(GenerationResponse {
            id: response.response_id.unwrap_or_default(),
            model: response.model_version.unwrap_or_else(|| model.to_string()),
            content,
            finish_reason: candidate.finish_reason,
            usage: Usage {
                input_tokens: usage.prompt_token_count,
                output_tokens: usage.candidates_token_count,
            },
        })
    }
}

impl MultimodalProvider for GeminiProvider {
    fn name(&self) -> &str {
        PROVIDER_GEMINI
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let body = Self::to_gemini_request(request);
        debug!(
            model = %self.model,
            parts = request.parts.len(),
            media = request.media_count(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::error_for_status(status, &error_body));
        }

        let gemini_resp: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        Self::from_gemini_response(gemini_resp, &self.model)
    }
}
