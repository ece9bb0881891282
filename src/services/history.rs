// src/services/history.rs
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One turn of a conversation. Fields are read-only once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: MessageRole,
    content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Conversation so far, oldest first. Owned by whoever drives the
/// conversation; the orchestrator only borrows it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return the new length.
    pub fn push(&mut self, message: ChatMessage) -> usize {
        self.messages.push(message);
        self.messages.len()
    }

    /// The trailing `size` messages (all of them if there are fewer).
    pub fn window(&self, size: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(size);
        &self.messages[start..]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<Vec<ChatMessage>> for ChatHistory {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_keeps_most_recent() {
        let mut history = ChatHistory::new();
        for i in 0..7 {
            history.push(ChatMessage::user(format!("m{i}")));
        }
        let window = history.window(5);
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].content(), "m2");
        assert_eq!(window[4].content(), "m6");
    }

    #[test]
    fn window_on_short_history() {
        let mut history = ChatHistory::new();
        assert!(history.window(5).is_empty());
        assert_eq!(history.push(ChatMessage::user("hello")), 1);
        assert_eq!(history.window(5).len(), 1);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hi");

        let history: ChatHistory =
            serde_json::from_str(r#"[{"role":"user","content":"a"},{"role":"system","content":"b"}]"#)
                .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.messages()[1].role(), MessageRole::System);
    }
}
