//! VideoAssistant: the summarize and question-answering operations.
//!
//! Each operation validates its input before any remote call, sends one
//! generation request with the output schema attached, and validates the
//! model's JSON against that schema. There is no retry.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tracing::{Instrument, debug, info_span, warn};

use visionchat_observe::genai_attrs::{OP_ANSWER_VIDEO_QUESTION, OP_SUMMARIZE_VIDEO};
use visionchat_types::error::{ModelInvocationError, ValidationError, VideoFlowError};
use visionchat_types::llm::{ContentPart, GenerationRequest, OutputSchema};
use visionchat_types::schema::{
    DataUri, Validate, VideoAnalysisInput, VideoAnalysisOutput, VideoChatbotInput,
    VideoChatbotOutput, parse_validated,
};

use crate::llm::provider::MultimodalProvider;

use super::prompt;

/// Per-assistant generation settings.
#[derive(Debug, Clone, Default)]
pub struct AssistantOptions {
    pub temperature: Option<f64>,
}

/// Runs the two video operations against an injected provider.
pub struct VideoAssistant<P: MultimodalProvider> {
    provider: P,
    options: AssistantOptions,
}

impl<P: MultimodalProvider> VideoAssistant<P> {
    pub fn new(provider: P, options: AssistantOptions) -> Self {
        Self { provider, options }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Summarize a whole video.
    pub async fn summarize_video(
        &self,
        input: &VideoAnalysisInput,
    ) -> Result<VideoAnalysisOutput, VideoFlowError> {
        input.validate()?;
        let video = DataUri::parse(&input.video_data_uri)?;

        let span = info_span!(
            "gen_ai.summarize_video",
            gen_ai.operation.name = OP_SUMMARIZE_VIDEO,
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %self.provider.model(),
            video.mime_type = %video.mime_type(),
            video.payload_len = video.payload().len(),
        );

        self.invoke(prompt::summarize_parts(&video))
            .instrument(span)
            .await
    }

    /// Answer a question about a video, using summary and history as context.
    pub async fn answer_video_question(
        &self,
        input: &VideoChatbotInput,
    ) -> Result<VideoChatbotOutput, VideoFlowError> {
        input.validate()?;
        let video = DataUri::parse(&input.video_data_uri)?;

        let span = info_span!(
            "gen_ai.answer_video_question",
            gen_ai.operation.name = OP_ANSWER_VIDEO_QUESTION,
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %self.provider.model(),
            video.mime_type = %video.mime_type(),
            video.payload_len = video.payload().len(),
            chat.has_summary = input.video_summary().is_some(),
            chat.has_history = input.chat_history().is_some(),
        );

        let parts = prompt::chat_parts(
            &video,
            &input.question,
            input.video_summary(),
            input.chat_history(),
        );
        self.invoke(parts).instrument(span).await
    }

    async fn invoke<T>(&self, parts: Vec<ContentPart>) -> Result<T, VideoFlowError>
    where
        T: Validate + DeserializeOwned + JsonSchema,
    {
        let request = GenerationRequest {
            parts,
            output_schema: Some(output_schema::<T>()),
            temperature: self.options.temperature,
        };

        let response = self.provider.generate(&request).await.map_err(|e| {
            warn!(error = %e, "model call failed");
            ModelInvocationError::Llm(e)
        })?;

        debug!(
            gen_ai.response.id = %response.id,
            gen_ai.usage.input_tokens = response.usage.input_tokens,
            gen_ai.usage.output_tokens = response.usage.output_tokens,
            finish_reason = ?response.finish_reason,
            "model call complete"
        );

        parse_output::<T>(&response.content).map_err(|e| {
            warn!(error = %e, "model output rejected");
            VideoFlowError::from(e)
        })
    }
}

/// The named JSON schema the model is asked to answer with.
pub fn output_schema<T: Validate + JsonSchema>() -> OutputSchema {
    let mut schema = schemars::schema_for!(T);
    schema.remove("$schema");
    OutputSchema {
        name: T::SCHEMA_NAME.to_string(),
        schema: schema.to_value(),
    }
}

/// Parse and validate raw model text as `T`.
///
/// A Markdown code fence around the JSON is tolerated.
pub fn parse_output<T>(content: &str) -> Result<T, ModelInvocationError>
where
    T: Validate + DeserializeOwned,
{
    let non_conformant = |source| ModelInvocationError::NonConformantOutput {
        schema: T::SCHEMA_NAME,
        source,
    };

    let value: serde_json::Value = serde_json::from_str(strip_code_fence(content))
        .map_err(|e| non_conformant(ValidationError::Deserialize(e.to_string())))?;
    parse_validated(value).map_err(non_conformant)
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
