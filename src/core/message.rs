//! # Transcript
//!
//! The ordered messages of the current chat view. Held in memory only.
//!
//! Entries are only ever appended. There is no edit, reorder or single
//! delete; `clear()` drops everything at once.

use chrono::{DateTime, Local};

/// Shown when the server answers without a `reply` field.
pub const REPLY_FALLBACK: &str = "I can help you with mathematical expressions and problems. Try asking me about calculus, algebra, or statistics!";

/// Shown when the chat request could not complete.
pub const NETWORK_ERROR_NOTICE: &str = "Network error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            created_at: Local::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    items: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns a reference to it.
    pub fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.items.push(message);
        &self.items[self.items.len() - 1]
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::new(Role::User, text))
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::new(Role::Assistant, text))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[ChatMessage] {
        &self.items
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
