//! Conversation store with single-flight pending tracking

use super::{Conversation, Message};
use thiserror::Error;

/// Reasons a user message is rejected before anything is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("A reply is still pending, wait for it before sending again")]
    ReplyPending,
}

/// Sole owner of a session's messages and its "awaiting reply" flag.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    conversation: Conversation,
    pending: bool,
}

impl ConversationStore {
    /// Start a conversation with a locally synthesized assistant greeting.
    pub fn new(welcome: impl Into<String>) -> Self {
        let mut conversation = Conversation::default();
        conversation.push(Message::assistant(welcome));
        Self {
            conversation,
            pending: false,
        }
    }

    /// Append a user turn.
    ///
    /// The stored text is trimmed. Whitespace-only text, or any text while a
    /// reply is outstanding, is rejected and leaves the conversation as is.
    pub fn append_user(&mut self, text: &str) -> Result<Conversation, ValidationError> {
        if self.pending {
            return Err(ValidationError::ReplyPending);
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        self.conversation.push(Message::user(trimmed));
        Ok(self.snapshot())
    }

    /// Append an assistant turn: a genuine reply or an error placeholder.
    pub fn append_assistant(&mut self, text: impl Into<String>) -> Conversation {
        self.conversation.push(Message::assistant(text));
        self.snapshot()
    }

    pub fn begin_pending(&mut self) {
        self.pending = true;
    }

    pub fn end_pending(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn snapshot(&self) -> Conversation {
        self.conversation.clone()
    }

    #[allow(dead_code)] // API completeness
    pub fn len(&self) -> usize {
        self.conversation.len()
    }
}
