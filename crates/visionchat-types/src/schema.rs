//! Video analysis / chat request-response contract.
//!
//! These records are exchanged between the client session, the backend
//! entry points and the model-invocation layer. Every boundary crossing
//! (HTTP body, remote model response) goes through [`parse_validated`] or
//! an explicit [`Validate::validate`] call -- static typing alone is not
//! trusted because the remote model's output is untyped on the wire.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Runtime shape check for a schema record.
pub trait Validate {
    /// Schema name used in error messages and as the structured-output name.
    const SCHEMA_NAME: &'static str;

    /// Wire names of fields that must be present and non-null.
    const REQUIRED_FIELDS: &'static [&'static str];

    /// Check the invariants serde cannot express.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Deserialize an untyped payload into `T` and validate it.
///
/// Required fields are checked by wire name before deserialization so a
/// missing field is reported as [`ValidationError::MissingField`] rather
/// than a generic serde message.
pub fn parse_validated<T>(value: serde_json::Value) -> Result<T, ValidationError>
where
    T: Validate + DeserializeOwned,
{
    let object = value.as_object().ok_or_else(|| {
        ValidationError::Deserialize(format!("{} must be a JSON object", T::SCHEMA_NAME))
    })?;

    for field in T::REQUIRED_FIELDS {
        match object.get(*field) {
            None | Some(serde_json::Value::Null) => {
                return Err(ValidationError::MissingField(field));
            }
            Some(_) => {}
        }
    }

    let parsed: T = serde_json::from_value(value)
        .map_err(|e| ValidationError::Deserialize(format!("{}: {e}", T::SCHEMA_NAME)))?;
    parsed.validate()?;
    Ok(parsed)
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

/// Treat empty/whitespace optional context as absent.
fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

// ---------------------------------------------------------------------------
// DataUri
// ---------------------------------------------------------------------------

/// A parsed `data:<mime>;base64,<payload>` URI.
///
/// Holds the MIME type and the still-encoded base64 payload; the payload is
/// never decoded here because it is forwarded to the model as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    mime_type: String,
    payload: String,
}

impl DataUri {
    /// Parse and validate a data URI string.
    pub fn parse(uri: &str) -> Result<Self, ValidationError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| ValidationError::MalformedDataUri("missing 'data:' prefix".into()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ValidationError::MalformedDataUri("missing ',' separator".into()))?;

        let media_type = header.strip_suffix(";base64").ok_or_else(|| {
            ValidationError::MalformedDataUri("payload must be base64 encoded".into())
        })?;

        // Parameters (e.g. `;codecs=...`) may follow the MIME type.
        let mime_type = media_type.split(';').next().unwrap_or_default();
        if !is_mime_type(mime_type) {
            return Err(ValidationError::MalformedDataUri(format!(
                "invalid MIME type '{mime_type}'"
            )));
        }

        if payload.is_empty() {
            return Err(ValidationError::MalformedDataUri("empty payload".into()));
        }
        if !is_base64(payload) {
            return Err(ValidationError::MalformedDataUri(
                "payload is not valid base64".into(),
            ));
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            payload: payload.to_string(),
        })
    }

    /// Encode raw bytes under the given MIME type.
    pub fn encode(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            payload: STANDARD.encode(bytes),
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload, without the header.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.payload)
    }
}

impl FromStr for DataUri {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_mime_type(mime: &str) -> bool {
    let Some((kind, subtype)) = mime.split_once('/') else {
        return false;
    };
    let token = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.' | '_'))
    };
    token(kind) && token(subtype)
}

fn is_base64(payload: &str) -> bool {
    if payload.len() % 4 != 0 {
        return false;
    }
    let body = payload.trim_end_matches('=');
    if payload.len() - body.len() > 2 {
        return false;
    }
    body.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

// ---------------------------------------------------------------------------
// Summarize
// ---------------------------------------------------------------------------

/// Input for the summarize operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAnalysisInput {
    /// A video, as a data URI that must include a MIME type and use Base64
    /// encoding: `data:<mimetype>;base64,<encoded_data>`.
    pub video_data_uri: String,
}

impl Validate for VideoAnalysisInput {
    const SCHEMA_NAME: &'static str = "VideoAnalysisInput";
    const REQUIRED_FIELDS: &'static [&'static str] = &["videoDataUri"];

    fn validate(&self) -> Result<(), ValidationError> {
        DataUri::parse(&self.video_data_uri).map(|_| ())
    }
}

/// Output of the summarize operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoAnalysisOutput {
    /// A concise and readable summary of the video content.
    pub summary: String,
}

impl Validate for VideoAnalysisOutput {
    const SCHEMA_NAME: &'static str = "VideoAnalysisOutput";
    const REQUIRED_FIELDS: &'static [&'static str] = &["summary"];

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("summary", &self.summary)
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Input for the question-answering operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoChatbotInput {
    /// A video, as a data URI (`data:<mimetype>;base64,<encoded_data>`).
    pub video_data_uri: String,
    /// The question about the video.
    pub question: String,
    /// Summary of the video. Context only; the video is the source of truth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_summary: Option<String>,
    /// Flattened chat history (`User: ...\nAssistant: ...`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_history: Option<String>,
}

impl VideoChatbotInput {
    /// Summary context, `None` when absent or blank.
    pub fn video_summary(&self) -> Option<&str> {
        non_blank(self.video_summary.as_ref())
    }

    /// History context, `None` when absent or blank.
    pub fn chat_history(&self) -> Option<&str> {
        non_blank(self.chat_history.as_ref())
    }
}

impl Validate for VideoChatbotInput {
    const SCHEMA_NAME: &'static str = "VideoChatbotInput";
    const REQUIRED_FIELDS: &'static [&'static str] = &["videoDataUri", "question"];

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("question", &self.question)?;
        DataUri::parse(&self.video_data_uri).map(|_| ())
    }
}

/// Output of the question-answering operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoChatbotOutput {
    /// The answer to the question about the video.
    pub answer: String,
}

impl Validate for VideoChatbotOutput {
    const SCHEMA_NAME: &'static str = "VideoChatbotOutput";
    const REQUIRED_FIELDS: &'static [&'static str] = &["answer"];

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("answer", &self.answer)
    }
}

/// What the analyze action hands back to the client: the summary only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeVideoResult {
    pub summary: String,
}

impl From<VideoAnalysisOutput> for AnalyzeVideoResult {
    fn from(output: VideoAnalysisOutput) -> Self {
        Self {
            summary: output.summary,
        }
    }
}
