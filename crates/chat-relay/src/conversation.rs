//! A single user's chat history.

use safety_core::{ChatMessage, Role};

/// Assistant message that opens every new conversation.
pub const WELCOME_MESSAGE: &str = "Hi, I'm Aksha's safety assistant. Ask me anything about \
staying safe or using the app. In an emergency, press SOS or call 112.";

/// Default maximum number of turns (user + assistant pairs) kept.
const DEFAULT_MAX_TURNS: usize = 20;

/// Ordered chat history with turn-based trimming.
///
/// System messages and the opening welcome are never trimmed.
///
/// # Example
///
/// ```rust
/// use chat_relay::{Conversation, Role};
///
/// let mut chat = Conversation::new();
/// chat.push_user("Is it safe to take the bus at night?");
/// chat.push_assistant("Wait in well-lit, populated areas.");
///
/// assert_eq!(chat.messages().len(), 3); // welcome + one turn
/// assert_eq!(chat.messages()[0].role, Role::Assistant);
/// ```
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    /// Leading messages exempt from trimming.
    pinned: usize,
    max_turns: usize,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Start a conversation with the welcome message.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
            pinned: 1,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Start a conversation with no messages.
    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
            pinned: 0,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Set the number of turns to keep. Zero keeps everything.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self.trim();
        self
    }

    /// Pin a system prompt at the start of the history.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.messages.insert(0, ChatMessage::system(prompt));
        self.pinned += 1;
        self
    }

    /// Append a user message.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
        self.trim();
    }

    /// Append an assistant message.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
        self.trim();
    }

    /// The history, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The most recent user message.
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }

    /// Number of messages, pinned ones included.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether there are no messages at all.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop everything except the pinned messages.
    pub fn clear(&mut self) {
        self.messages.truncate(self.pinned);
    }

    fn trim(&mut self) {
        if self.max_turns == 0 {
            return;
        }
        let max_messages = self.max_turns * 2;
        let unpinned = self.messages.len() - self.pinned;
        if unpinned > max_messages {
            let excess = unpinned - max_messages;
            self.messages.drain(self.pinned..self.pinned + excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_with_welcome() {
        let chat = Conversation::new();
        assert_eq!(chat.len(), 1);
        assert_eq!(chat.messages()[0].content, WELCOME_MESSAGE);
        assert_eq!(chat.last_user_message(), None);
    }

    #[test]
    fn test_trim_keeps_pinned() {
        let mut chat = Conversation::new()
            .with_system_prompt("be brief")
            .with_max_turns(2);

        for i in 0..4 {
            chat.push_user(format!("q{}", i));
            chat.push_assistant(format!("a{}", i));
        }

        let contents: Vec<&str> = chat.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["be brief", WELCOME_MESSAGE, "q2", "a2", "q3", "a3"]);
        assert_eq!(chat.last_user_message(), Some("q3"));
    }

    #[test]
    fn test_clear() {
        let mut chat = Conversation::new();
        chat.push_user("hello");
        chat.clear();
        assert_eq!(chat.len(), 1);

        let mut empty = Conversation::empty();
        empty.push_user("hello");
        empty.clear();
        assert!(empty.is_empty());
    }
}
