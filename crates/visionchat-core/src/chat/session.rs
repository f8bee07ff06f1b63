//! Per-video client session.
//!
//! Drives the `Empty -> Selected -> Processing -> Ready` state machine for
//! one selected video and owns its chat transcript. `process` and `ask`
//! take `&mut self`, so a session never has two requests in flight.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use visionchat_types::chat::ChatMessage;
use visionchat_types::error::SessionError;
use visionchat_types::schema::{DataUri, VideoAnalysisInput, VideoChatbotInput};

use crate::actions::VideoActions;
use crate::media::reader::VideoReader;

use super::transcript::Transcript;

/// Status shown while a video is being analyzed.
pub const PROCESSING_STATUS: &str = "Analyzing video... this may take a moment.";

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoState {
    Empty,
    Selected,
    Processing,
    Ready { summary: String },
}

/// The video a session currently works on.
#[derive(Debug, Clone)]
pub struct SelectedVideo {
    pub path: PathBuf,
    /// Local `file://` URL for previewing. Never sent to the backend.
    pub preview_url: String,
    pub mime_type: String,
}

pub struct VideoSession<A: VideoActions, R: VideoReader> {
    id: Uuid,
    actions: A,
    reader: R,
    state: VideoState,
    selected: Option<SelectedVideo>,
    /// Encoded once per selection and re-sent on every chat turn.
    data_uri: Option<String>,
    transcript: Transcript,
    status_message: Option<&'static str>,
}

impl<A: VideoActions, R: VideoReader> VideoSession<A, R> {
    pub fn new(actions: A, reader: R) -> Self {
        Self {
            id: Uuid::now_v7(),
            actions,
            reader,
            state: VideoState::Empty,
            selected: None,
            data_uri: None,
            transcript: Transcript::new(),
            status_message: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &VideoState {
        &self.state
    }

    pub fn selected(&self) -> Option<&SelectedVideo> {
        self.selected.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn status_message(&self) -> Option<&'static str> {
        self.status_message
    }

    /// The summary, once the video has been processed.
    pub fn summary(&self) -> Option<&str> {
        match &self.state {
            VideoState::Ready { summary } => Some(summary),
            _ => None,
        }
    }

    /// Select a video, discarding any summary, transcript and cached data.
    ///
    /// Allowed from every state.
    pub fn select_video(&mut self, path: impl AsRef<Path>) -> Result<&SelectedVideo, SessionError> {
        let path = std::path::absolute(path.as_ref()).map_err(|e| SessionError::Io(e.to_string()))?;
        let preview_url = file_url(&path)?;
        let mime_type = self.reader.mime_type(&path);

        info!(session_id = %self.id, path = %path.display(), %mime_type, "video selected");

        self.transcript.clear();
        self.data_uri = None;
        self.status_message = None;
        self.state = VideoState::Selected;

        let selected = self.selected.insert(SelectedVideo {
            preview_url,
            path,
            mime_type,
        });
        Ok(selected)
    }

    /// Encode the selected video and ask the backend for its summary.
    ///
    /// On failure the session returns to `Selected` so the user can retry.
    pub async fn process(&mut self) -> Result<&str, SessionError> {
        let Some(selected) = self.selected.clone() else {
            return Err(SessionError::NoVideoSelected);
        };

        self.state = VideoState::Processing;
        self.status_message = Some(PROCESSING_STATUS);

        let result = self.analyze(&selected).await;
        self.status_message = None;

        match result {
            Ok(summary) => {
                info!(session_id = %self.id, summary_len = summary.len(), "video processed");
                self.state = VideoState::Ready { summary };
                Ok(self.summary().unwrap_or_default())
            }
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "video processing failed");
                self.state = VideoState::Selected;
                Err(e)
            }
        }
    }

    async fn analyze(&mut self, selected: &SelectedVideo) -> Result<String, SessionError> {
        let bytes = self
            .reader
            .read(&selected.path)
            .await
            .map_err(|e| SessionError::Io(e.to_string()))?;
        let data_uri = DataUri::encode(&selected.mime_type, &bytes).to_string();
        debug!(session_id = %self.id, bytes = bytes.len(), "video encoded");

        self.data_uri = Some(data_uri.clone());
        let result = self
            .actions
            .analyze_video(VideoAnalysisInput {
                video_data_uri: data_uri,
            })
            .await?;
        Ok(result.summary)
    }

    /// Ask a question about the processed video.
    ///
    /// The question is appended to the transcript before the request and
    /// stays there if the request fails; the reply is appended on success.
    pub async fn ask(&mut self, question: &str) -> Result<String, SessionError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SessionError::EmptyQuestion);
        }
        let VideoState::Ready { summary } = &self.state else {
            return Err(SessionError::NotReady);
        };
        let Some(video_data_uri) = self.data_uri.clone() else {
            return Err(SessionError::NotReady);
        };

        let input = VideoChatbotInput {
            video_data_uri,
            question: question.to_string(),
            video_summary: Some(summary.clone()),
            chat_history: Some(self.transcript.format_history()),
        };
        self.transcript.push(ChatMessage::user(question));

        match self.actions.chat_with_video(input).await {
            Ok(answer) => {
                self.transcript.push(ChatMessage::assistant(answer.clone()));
                Ok(answer)
            }
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "chat request failed");
                Err(e.into())
            }
        }
    }
}

/// `file://` URL for an absolute local path, percent-encoded.
fn file_url(path: &Path) -> Result<String, SessionError> {
    Url::from_file_path(path)
        .map(String::from)
        .map_err(|()| SessionError::Io(format!("cannot build a file URL for {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockProvider;
    use crate::video::assistant::{AssistantOptions, VideoAssistant};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use visionchat_types::chat::ChatRole;
    use visionchat_types::error::VideoFlowError;
    use visionchat_types::llm::LlmError;
    use visionchat_types::schema::AnalyzeVideoResult;

    struct FakeReader {
        fail: bool,
    }

    impl VideoReader for FakeReader {
        fn mime_type(&self, path: &Path) -> String {
            match path.extension().and_then(|e| e.to_str()) {
                Some("webm") => "video/webm".to_string(),
                _ => "video/mp4".to_string(),
            }
        }

        async fn read(&self, _path: &Path) -> Result<Vec<u8>, std::io::Error> {
            if self.fail {
                Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
            } else {
                Ok(b"fake video bytes".to_vec())
            }
        }
    }

    #[derive(Default)]
    struct FakeActions {
        analyze_calls: AtomicUsize,
        chat_calls: AtomicUsize,
        fail_analyze: bool,
        fail_chat: bool,
        last_chat: Mutex<Option<VideoChatbotInput>>,
    }

    impl VideoActions for FakeActions {
        async fn analyze_video(
            &self,
            input: VideoAnalysisInput,
        ) -> Result<AnalyzeVideoResult, VideoFlowError> {
            self.analyze_calls.fetch_add(1, Ordering::SeqCst);
            assert!(DataUri::parse(&input.video_data_uri).is_ok());
            if self.fail_analyze {
                return Err(LlmError::RateLimited.into());
            }
            Ok(AnalyzeVideoResult {
                summary: "A red ball bounces.".to_string(),
            })
        }

        async fn chat_with_video(&self, input: VideoChatbotInput) -> Result<String, VideoFlowError> {
            self.chat_calls.fetch_add(1, Ordering::SeqCst);
            let n = self.chat_calls.load(Ordering::SeqCst);
            *self.last_chat.lock().unwrap() = Some(input);
            if self.fail_chat {
                return Err(LlmError::AuthenticationFailed.into());
            }
            Ok(format!("A{n}"))
        }
    }

    fn session(actions: FakeActions) -> VideoSession<Arc<FakeActions>, FakeReader> {
        VideoSession::new(Arc::new(actions), FakeReader { fail: false })
    }

    #[tokio::test]
    async fn test_process_without_selection() {
        let mut s = session(FakeActions::default());
        let err = s.process().await.unwrap_err();
        assert!(matches!(err, SessionError::NoVideoSelected));
        assert_eq!(s.actions.analyze_calls.load(Ordering::SeqCst), 0);
        assert_eq!(s.state(), &VideoState::Empty);
    }

    #[tokio::test]
    async fn test_ask_before_ready_makes_no_request() {
        let mut s = session(FakeActions::default());
        s.select_video("clip.mp4").unwrap();
        let err = s.ask("What happens?").await.unwrap_err();
        assert!(matches!(err, SessionError::NotReady));
        assert_eq!(s.actions.chat_calls.load(Ordering::SeqCst), 0);
        assert!(s.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_empty_question_rejected() {
        let mut s = session(FakeActions::default());
        s.select_video("clip.mp4").unwrap();
        s.process().await.unwrap();
        let err = s.ask("   ").await.unwrap_err();
        assert!(matches!(err, SessionError::EmptyQuestion));
        assert_eq!(s.actions.chat_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_select_builds_preview_url() {
        let mut s = session(FakeActions::default());
        let selected = s.select_video("/videos/my clip.webm").unwrap();
        assert_eq!(selected.mime_type, "video/webm");
        assert!(selected.preview_url.starts_with("file://"));
        assert!(selected.preview_url.ends_with("my%20clip.webm"));
        assert!(selected.path.is_absolute());
        assert_eq!(s.state(), &VideoState::Selected);
    }

    #[cfg(unix)]
    #[test]
    fn test_preview_url_escapes_backslash_and_non_ascii() {
        let mut s = session(FakeActions::default());

        let selected = s.select_video("/videos/a\\b.mp4").unwrap().clone();
        assert_eq!(selected.preview_url, "file:///videos/a%5Cb.mp4");

        let selected = s.select_video("/videos/café \"x\" <1>.mp4").unwrap().clone();
        assert_eq!(
            selected.preview_url,
            "file:///videos/caf%C3%A9%20%22x%22%20%3C1%3E.mp4"
        );
        let back = Url::parse(&selected.preview_url).unwrap().to_file_path().unwrap();
        assert_eq!(back, selected.path);
    }

    #[tokio::test]
    async fn test_history_excludes_new_question() {
        let mut s = session(FakeActions::default());
        s.select_video("clip.mp4").unwrap();
        s.process().await.unwrap();

        assert_eq!(s.ask("Q1").await.unwrap(), "A1");
        s.ask("Q2").await.unwrap();

        let last = s.actions.last_chat.lock().unwrap().clone().unwrap();
        assert_eq!(last.question, "Q2");
        assert_eq!(last.chat_history.as_deref(), Some("User: Q1\nAssistant: A1"));
        assert_eq!(last.video_summary.as_deref(), Some("A red ball bounces."));
        assert_eq!(s.transcript().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_chat_keeps_user_message() {
        let mut s = session(FakeActions {
            fail_chat: true,
            ..Default::default()
        });
        s.select_video("clip.mp4").unwrap();
        s.process().await.unwrap();

        let err = s.ask("What color?").await.unwrap_err();
        assert!(matches!(err, SessionError::Flow(_)));
        assert_eq!(s.transcript().len(), 1);
        assert_eq!(s.transcript().messages()[0].role, ChatRole::User);
    }

    #[tokio::test]
    async fn test_failed_process_returns_to_selected() {
        let mut s = session(FakeActions {
            fail_analyze: true,
            ..Default::default()
        });
        s.select_video("clip.mp4").unwrap();
        let err = s.process().await.unwrap_err();
        assert!(matches!(err, SessionError::Flow(_)));
        assert_eq!(s.state(), &VideoState::Selected);
        assert!(s.status_message().is_none());
    }

    #[tokio::test]
    async fn test_unreadable_video_is_io_error() {
        let mut s = VideoSession::new(FakeActions::default(), FakeReader { fail: true });
        s.select_video("missing.mp4").unwrap();
        let err = s.process().await.unwrap_err();
        assert!(matches!(err, SessionError::Io(_)));
        assert_eq!(s.actions.analyze_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reselect_resets_session() {
        let mut s = session(FakeActions::default());
        s.select_video("first.mp4").unwrap();
        s.process().await.unwrap();
        s.ask("Q1").await.unwrap();

        s.select_video("second.mp4").unwrap();
        assert_eq!(s.state(), &VideoState::Selected);
        assert!(s.summary().is_none());
        assert!(s.transcript().is_empty());
        assert!(s.data_uri.is_none());
    }

    #[tokio::test]
    async fn test_end_to_end_with_assistant() {
        let assistant = VideoAssistant::new(MockProvider::video_model(), AssistantOptions::default());
        let mut s = VideoSession::new(assistant, FakeReader { fail: false });

        s.select_video("ball.mp4").unwrap();
        let summary = s.process().await.unwrap().to_string();
        assert!(!summary.is_empty());

        let answer = s.ask("What color is the background?").await.unwrap();
        let colors = ["red", "blue", "green", "white", "black", "yellow"];
        assert!(colors.iter().any(|c| answer.to_lowercase().contains(c)));
        assert_eq!(s.transcript().len(), 2);
    }
}
