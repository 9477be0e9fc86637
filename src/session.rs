//! Chat sessions
//!
//! A session binds one conversation store to the reply client and drives a
//! user send through to its reply. The manager keeps live sessions in
//! memory, one per widget instance; nothing is persisted.

mod chat;
mod manager;

pub use chat::ChatSession;
pub use manager::SessionManager;
