//! Test doubles shared by the unit tests of this crate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use visionchat_types::llm::{GenerationRequest, GenerationResponse, LlmError, Usage};

use crate::llm::provider::MultimodalProvider;

#[derive(Clone)]
enum MockReply {
    Fixed(String),
    /// Answers by the requested output schema, like a well-behaved model.
    BySchema,
    RateLimited,
}

pub struct MockProvider {
    reply: MockReply,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<GenerationRequest>>>,
}

impl MockProvider {
    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn replying(content: &str) -> Self {
        Self::with_reply(MockReply::Fixed(content.to_string()))
    }

    pub fn video_model() -> Self {
        Self::with_reply(MockReply::BySchema)
    }

    pub fn rate_limited() -> Self {
        Self::with_reply(MockReply::RateLimited)
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn last_request(&self) -> Arc<Mutex<Option<GenerationRequest>>> {
        Arc::clone(&self.last_request)
    }
}

impl MultimodalProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let content = match &self.reply {
            MockReply::Fixed(content) => content.clone(),
            MockReply::BySchema => {
                let schema = request.output_schema.as_ref().map(|s| s.name.as_str());
                match schema {
                    Some("VideoAnalysisOutput") => {
                        r#"{"summary":"A red ball bounces across a blue background."}"#.to_string()
                    }
                    _ => r#"{"answer":"The background is blue."}"#.to_string(),
                }
            }
            MockReply::RateLimited => return Err(LlmError::RateLimited),
        };

        Ok(GenerationResponse {
            id: "resp-mock".to_string(),
            model: "mock-model".to_string(),
            content,
            finish_reason: Some("STOP".to_string()),
            usage: Usage {
                input_tokens: 1200,
                output_tokens: 40,
            },
        })
    }
}
