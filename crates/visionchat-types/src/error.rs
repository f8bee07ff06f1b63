use thiserror::Error;

use crate::llm::LlmError;

/// A payload failed its schema check.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("malformed data URI: {0}")]
    MalformedDataUri(String),

    #[error("invalid payload: {0}")]
    Deserialize(String),
}

/// The remote model call failed or answered off-schema.
#[derive(Debug, Error)]
pub enum ModelInvocationError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("model output did not match {schema}: {source}")]
    NonConformantOutput {
        schema: &'static str,
        #[source]
        source: ValidationError,
    },
}

/// Errors returned by the summarize and question-answering operations.
#[derive(Debug, Error)]
pub enum VideoFlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    ModelInvocation(#[from] ModelInvocationError),
}

impl VideoFlowError {
    /// True when the request was rejected before any remote call.
    pub fn is_validation(&self) -> bool {
        matches!(self, VideoFlowError::Validation(_))
    }
}

impl From<LlmError> for VideoFlowError {
    fn from(err: LlmError) -> Self {
        VideoFlowError::ModelInvocation(ModelInvocationError::Llm(err))
    }
}

/// Errors surfaced by a client video session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no video selected")]
    NoVideoSelected,

    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("video has not been processed yet")]
    NotReady,

    #[error("failed to read video: {0}")]
    Io(String),

    #[error(transparent)]
    Flow(#[from] VideoFlowError),
}
