//! Values recorded in the OpenTelemetry GenAI fields of model-call spans.
//!
//! `tracing` span macros take field names as literal tokens
//! (`gen_ai.operation.name`, `gen_ai.system`, `gen_ai.request.model`,
//! `gen_ai.usage.*`, `gen_ai.response.id`), so only the values live here.

// --- Operation name values ---

/// Whole-video summary for the client.
pub const OP_SUMMARIZE_VIDEO: &str = "summarize_video";

/// Question answered against the video.
pub const OP_ANSWER_VIDEO_QUESTION: &str = "answer_video_question";

// --- Provider name values ---

pub const PROVIDER_GEMINI: &str = "gemini";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_values_are_distinct() {
        assert_ne!(OP_SUMMARIZE_VIDEO, OP_ANSWER_VIDEO_QUESTION);
    }
}
