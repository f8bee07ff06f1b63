//! Instruction templates for the two video operations.
//!
//! Templates render to ordered [`ContentPart`]s: the instruction text, then
//! the video inline, then whatever context and question follow it.

use visionchat_types::llm::ContentPart;
use visionchat_types::schema::DataUri;

pub const SUMMARIZE_INSTRUCTIONS: &str = "You are an expert video summarizer. Watch the following \
video and create a concise, engaging, and readable summary of its content. Focus on creating a \
narrative flow.";

pub const CHAT_INSTRUCTIONS: &str = "You are a highly intelligent and meticulous video analysis \
assistant. Your task is to answer questions about a video with extreme accuracy and attention to \
detail.

When answering, pay close attention to the specifics of the user's question. If they ask you to \
count objects, count them carefully. If they ask for colors, identify them precisely. Do not make \
assumptions.

The video is the absolute source of truth. Use the summary and chat history for context only.";

pub const CHAT_CLOSING: &str = "Provide a precise and detailed answer based on the video content.";

fn video_part(video: &DataUri) -> ContentPart {
    ContentPart::inline_media(video.mime_type(), video.payload())
}

/// Parts for the summarize operation.
pub fn summarize_parts(video: &DataUri) -> Vec<ContentPart> {
    vec![
        ContentPart::text(format!("{SUMMARIZE_INSTRUCTIONS}\n\nVideo:")),
        video_part(video),
    ]
}

/// Parts for the question-answering operation.
///
/// `Video Summary:` and `Chat History:` sections are emitted only when the
/// corresponding context is present.
pub fn chat_parts(
    video: &DataUri,
    question: &str,
    summary: Option<&str>,
    history: Option<&str>,
) -> Vec<ContentPart> {
    let mut tail = String::new();
    if let Some(summary) = summary {
        tail.push_str(&format!("Video Summary: {summary}\n"));
    }
    if let Some(history) = history {
        tail.push_str(&format!("Chat History:\n{history}\n"));
    }
    tail.push_str(&format!("\nQuestion: {question}\n\n{CHAT_CLOSING}"));

    vec![
        ContentPart::text(format!("{CHAT_INSTRUCTIONS}\n\nVideo:")),
        video_part(video),
        ContentPart::text(tail),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> DataUri {
        DataUri::parse("data:video/mp4;base64,AAAA").unwrap()
    }

    fn text_of(part: &ContentPart) -> &str {
        match part {
            ContentPart::Text { text } => text,
            other => panic!("expected text part, got {other:?}"),
        }
    }

    #[test]
    fn test_summarize_parts_embed_video_after_instructions() {
        let parts = summarize_parts(&clip());
        assert_eq!(parts.len(), 2);
        assert!(text_of(&parts[0]).starts_with("You are an expert video summarizer."));
        assert_eq!(parts[1], ContentPart::inline_media("video/mp4", "AAAA"));
    }

    #[test]
    fn test_chat_parts_without_context() {
        let parts = chat_parts(&clip(), "How many birds?", None, None);
        assert_eq!(parts.len(), 3);
        let tail = text_of(&parts[2]);
        assert!(!tail.contains("Video Summary:"));
        assert!(!tail.contains("Chat History:"));
        assert!(tail.contains("Question: How many birds?"));
        assert!(tail.ends_with(CHAT_CLOSING));
    }

    #[test]
    fn test_chat_parts_context_order() {
        let parts = chat_parts(
            &clip(),
            "And now?",
            Some("Birds fly over a lake."),
            Some("User: How many birds?\nAssistant: Three."),
        );
        let tail = text_of(&parts[2]);
        let summary_at = tail.find("Video Summary: Birds fly over a lake.").unwrap();
        let history_at = tail.find("Chat History:\nUser: How many birds?").unwrap();
        let question_at = tail.find("Question: And now?").unwrap();
        assert!(summary_at < history_at && history_at < question_at);
        assert!(text_of(&parts[0]).contains("absolute source of truth"));
    }
}
