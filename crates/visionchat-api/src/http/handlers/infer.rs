//! POST /api/infer -- answer one question about an uploaded video.
//!
//! Multipart fields: `video` (file) and `prompt` (text). The upload is
//! re-encoded as a data URI under the configured `infer_video_mime`,
//! whatever type the client declared, and answered without summary or
//! history context.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Response;
use tracing::{info, warn};

use visionchat_types::schema::{DataUri, VideoChatbotInput};

use crate::http::error::{InferError, plain_text};
use crate::state::AppState;

pub async fn infer(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, InferError> {
    let mut video = None;
    let mut prompt = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("video") => video = Some(field.bytes().await?),
            Some("prompt") => prompt = Some(field.text().await?),
            _ => {}
        }
    }

    let (Some(video), Some(prompt)) = (video, prompt.filter(|p| !p.trim().is_empty())) else {
        return Err(InferError::MissingInput);
    };

    let mime = &state.config.server.infer_video_mime;
    info!(video_bytes = video.len(), %mime, "inference request");

    let input = VideoChatbotInput {
        video_data_uri: DataUri::encode(mime, &video).to_string(),
        question: prompt,
        video_summary: None,
        chat_history: None,
    };

    let output = state
        .assistant
        .answer_video_question(&input)
        .await
        .inspect_err(|e| warn!(error = %e, "inference failed"))?;

    Ok(plain_text(StatusCode::OK, output.answer))
}
