//! Conversation state
//!
//! Owns the ordered message history of one widget session together with
//! the single-flight "awaiting reply" flag.

mod message;
mod store;

#[cfg(test)]
mod proptests;

pub use message::{Conversation, Message, Role};
pub use store::{ConversationStore, ValidationError};
