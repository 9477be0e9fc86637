//! Generative reply client abstraction
//!
//! A reply client turns a conversation snapshot plus the fixed instructions
//! into the next assistant message, with exactly one outbound request per
//! call.

mod error;
mod gemini;

#[cfg(test)]
pub mod testing;

pub use error::{ReplyError, ReplyErrorKind};
pub use gemini::{GeminiConfig, GeminiReplyClient, DEFAULT_API_BASE, DEFAULT_MODEL};

use crate::conversation::Conversation;
use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for reply providers
#[async_trait]
pub trait ReplyClient: Send + Sync {
    /// Request the reply to the last turn of `conversation`
    async fn request_reply(
        &self,
        conversation: &Conversation,
        instructions: &str,
    ) -> Result<String, ReplyError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: ReplyClient + ?Sized> ReplyClient for Arc<T> {
    async fn request_reply(
        &self,
        conversation: &Conversation,
        instructions: &str,
    ) -> Result<String, ReplyError> {
        (**self).request_reply(conversation, instructions).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}

/// Logging wrapper for reply clients
pub struct LoggingReplyClient {
    inner: Arc<dyn ReplyClient>,
    model_id: String,
}

impl LoggingReplyClient {
    pub fn new(inner: Arc<dyn ReplyClient>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl ReplyClient for LoggingReplyClient {
    async fn request_reply(
        &self,
        conversation: &Conversation,
        instructions: &str,
    ) -> Result<String, ReplyError> {
        let start = std::time::Instant::now();
        let result = self.inner.request_reply(conversation, instructions).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    turns = conversation.len(),
                    reply_chars = reply.chars().count(),
                    "Reply request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    turns = conversation.len(),
                    kind = ?e.kind,
                    status = ?e.status,
                    error = %e.message,
                    "Reply request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
