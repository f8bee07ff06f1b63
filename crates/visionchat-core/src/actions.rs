//! In-process backend actions called by the client.
//!
//! `analyze_video` narrows the summarize output to `{ summary }`;
//! `chat_with_video` returns the bare answer text. The [`VideoActions`]
//! trait lets a client session run against the real assistant or a fake.

use std::future::Future;
use std::sync::Arc;

use visionchat_types::error::VideoFlowError;
use visionchat_types::schema::{AnalyzeVideoResult, VideoAnalysisInput, VideoChatbotInput};

use crate::llm::provider::MultimodalProvider;
use crate::video::assistant::VideoAssistant;

/// Summarize a video for the client.
pub async fn analyze_video<P: MultimodalProvider>(
    assistant: &VideoAssistant<P>,
    input: VideoAnalysisInput,
) -> Result<AnalyzeVideoResult, VideoFlowError> {
    let output = assistant.summarize_video(&input).await?;
    Ok(output.into())
}

/// Answer one chat question about a video.
pub async fn chat_with_video<P: MultimodalProvider>(
    assistant: &VideoAssistant<P>,
    input: VideoChatbotInput,
) -> Result<String, VideoFlowError> {
    let output = assistant.answer_video_question(&input).await?;
    Ok(output.answer)
}

/// Backend surface a client session talks to.
pub trait VideoActions: Send + Sync {
    fn analyze_video(
        &self,
        input: VideoAnalysisInput,
    ) -> impl Future<Output = Result<AnalyzeVideoResult, VideoFlowError>> + Send;

    fn chat_with_video(
        &self,
        input: VideoChatbotInput,
    ) -> impl Future<Output = Result<String, VideoFlowError>> + Send;
}

impl<P: MultimodalProvider> VideoActions for VideoAssistant<P> {
    fn analyze_video(
        &self,
        input: VideoAnalysisInput,
    ) -> impl Future<Output = Result<AnalyzeVideoResult, VideoFlowError>> + Send {
        analyze_video(self, input)
    }

    fn chat_with_video(
        &self,
        input: VideoChatbotInput,
    ) -> impl Future<Output = Result<String, VideoFlowError>> + Send {
        chat_with_video(self, input)
    }
}

impl<A: VideoActions> VideoActions for Arc<A> {
    fn analyze_video(
        &self,
        input: VideoAnalysisInput,
    ) -> impl Future<Output = Result<AnalyzeVideoResult, VideoFlowError>> + Send {
        <A as VideoActions>::analyze_video(self, input)
    }

    fn chat_with_video(
        &self,
        input: VideoChatbotInput,
    ) -> impl Future<Output = Result<String, VideoFlowError>> + Send {
        <A as VideoActions>::chat_with_video(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockProvider;
    use crate::video::assistant::AssistantOptions;

    const CLIP: &str = "data:video/mp4;base64,AAAAIGZ0eXBpc29t";

    #[tokio::test]
    async fn test_analyze_video_returns_summary_only() {
        let assistant = VideoAssistant::new(MockProvider::video_model(), AssistantOptions::default());
        let result = analyze_video(
            &assistant,
            VideoAnalysisInput {
                video_data_uri: CLIP.to_string(),
            },
        )
        .await
        .unwrap();
        assert!(!result.summary.is_empty());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_chat_with_video_through_arc() {
        let assistant = Arc::new(VideoAssistant::new(
            MockProvider::replying(r#"{"answer":"Three cars."}"#),
            AssistantOptions::default(),
        ));
        let answer = VideoActions::chat_with_video(
            &assistant,
            VideoChatbotInput {
                video_data_uri: CLIP.to_string(),
                question: "How many cars?".to_string(),
                video_summary: None,
                chat_history: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(answer, "Three cars.");
    }
}
