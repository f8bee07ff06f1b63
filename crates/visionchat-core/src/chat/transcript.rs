//! Ordered user/assistant messages of one video session.

use visionchat_types::chat::ChatMessage;

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Flatten to `"User: ...\nAssistant: ..."` for the model prompt.
    pub fn format_history(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role.label(), m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_history() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("Q1"));
        transcript.push(ChatMessage::assistant("A1"));
        assert_eq!(transcript.format_history(), "User: Q1\nAssistant: A1");
    }

    #[test]
    fn test_format_history_empty() {
        assert_eq!(Transcript::new().format_history(), "");
    }

    #[test]
    fn test_clear() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("Q1"));
        transcript.clear();
        assert!(transcript.is_empty());
    }
}
