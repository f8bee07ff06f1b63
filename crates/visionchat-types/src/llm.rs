//! Multimodal model request/response types.
//!
//! These types model a single non-streaming generation call: an ordered
//! list of content parts (text and inline media), a named JSON schema the
//! model output must follow, and the text the model returned.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One piece of a generation prompt, in send order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        text: String,
    },
    /// Media embedded inline as base64 (no upload step).
    InlineMedia {
        mime_type: String,
        data: String,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn inline_media(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        ContentPart::InlineMedia {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// JSON schema the model is asked to answer with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSchema {
    pub name: String,
    pub schema: serde_json::Value,
}

/// Request to a multimodal provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub parts: Vec<ContentPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<OutputSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl GenerationRequest {
    /// Number of inline media parts (logged, never the payload itself).
    pub fn media_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, ContentPart::InlineMedia { .. }))
            .count()
    }
}

/// Response from a multimodal provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub id: String,
    pub model: String,
    /// Raw model text. Expected to be JSON when an output schema was sent.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    pub usage: Usage,
}

/// Token usage for a generation call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from multimodal provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("model returned no content")]
    EmptyResponse,

    #[error("response blocked: {0}")]
    Blocked(String),
}

/// Type of model backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    Gemini,
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::Gemini => write!(f, "gemini"),
        }
    }
}

impl FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(ProviderType::Gemini),
            other => Err(format!("invalid provider type: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_part_serde() {
        let part = ContentPart::inline_media("video/mp4", "AAAA");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["type"], "inline_media");
        assert_eq!(json["mime_type"], "video/mp4");
    }

    #[test]
    fn test_media_count() {
        let request = GenerationRequest {
            parts: vec![
                ContentPart::text("Watch this"),
                ContentPart::inline_media("video/mp4", "AAAA"),
                ContentPart::text("Question: what happens?"),
            ],
            output_schema: None,
            temperature: None,
        };
        assert_eq!(request.media_count(), 1);
    }

    #[test]
    fn test_provider_type_roundtrip() {
        let parsed: ProviderType = ProviderType::Gemini.to_string().parse().unwrap();
        assert_eq!(parsed, ProviderType::Gemini);
        assert!("GEMINI".parse::<ProviderType>().is_ok());
        assert!("openai".parse::<ProviderType>().is_err());
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::Blocked("SAFETY".to_string());
        assert_eq!(err.to_string(), "response blocked: SAFETY");
    }
}
