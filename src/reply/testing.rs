//! Mock reply client for testing
//!
//! Returns queued outcomes in order and records every request it sees.

use super::{ReplyClient, ReplyError};
use crate::conversation::{Conversation, Message};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// A request as the mock saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub instructions: String,
}

/// Mock reply client that returns queued outcomes
pub struct MockReplyClient {
    outcomes: Mutex<VecDeque<Result<String, ReplyError>>>,
    model_id: String,
    /// When set, every request waits for a notification before answering
    gate: Option<Arc<Notify>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockReplyClient {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            gate: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Hold each request until `gate` is notified
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.outcomes.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: ReplyError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplyClient for MockReplyClient {
    async fn request_reply(
        &self,
        conversation: &Conversation,
        instructions: &str,
    ) -> Result<String, ReplyError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            messages: conversation.messages().to_vec(),
            instructions: instructions.to_string(),
        });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ReplyError::transport("No mock outcome queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
