//! `/api/infer` error type mapping to plain-text HTTP responses.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

use visionchat_types::error::{ModelInvocationError, ValidationError, VideoFlowError};

pub const MISSING_INPUT_MESSAGE: &str = "Missing video or prompt";

#[derive(Debug)]
pub enum InferError {
    /// `video` or `prompt` absent, or `prompt` blank.
    MissingInput,
    /// The multipart body could not be decoded (or exceeded the body limit).
    Multipart(MultipartError),
    /// The assembled model input failed validation.
    Validation(ValidationError),
    /// The model call failed.
    Model(ModelInvocationError),
}

impl From<MultipartError> for InferError {
    fn from(e: MultipartError) -> Self {
        InferError::Multipart(e)
    }
}

impl From<VideoFlowError> for InferError {
    fn from(e: VideoFlowError) -> Self {
        match e {
            VideoFlowError::Validation(e) => InferError::Validation(e),
            VideoFlowError::ModelInvocation(e) => InferError::Model(e),
        }
    }
}

/// A `text/plain` response.
pub fn plain_text(status: StatusCode, body: String) -> Response {
    (status, [(CONTENT_TYPE, "text/plain")], body).into_response()
}

impl IntoResponse for InferError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            InferError::MissingInput => (StatusCode::BAD_REQUEST, MISSING_INPUT_MESSAGE.to_string()),
            InferError::Multipart(e) => (e.status(), e.body_text()),
            InferError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            InferError::Model(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred: {e}"),
            ),
        };
        plain_text(status, body)
    }
}
