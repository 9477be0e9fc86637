//! A single chat session

use crate::conversation::{Conversation, ConversationStore, ValidationError};
use crate::reply::{ReplyClient, ReplyErrorKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// One conversation plus the means to extend it.
///
/// The store lock is never held across the outbound request; the pending
/// flag alone keeps a second send out while a reply is in flight.
pub struct ChatSession {
    store: Mutex<ConversationStore>,
    client: Arc<dyn ReplyClient>,
    instructions: Arc<str>,
    last_active: Mutex<Instant>,
}

impl ChatSession {
    pub fn new(welcome: &str, client: Arc<dyn ReplyClient>, instructions: Arc<str>) -> Self {
        Self {
            store: Mutex::new(ConversationStore::new(welcome)),
            client,
            instructions,
            last_active: Mutex::new(Instant::now()),
        }
    }

    /// Record activity so the session is not evicted as idle
    pub async fn touch(&self) {
        *self.last_active.lock().await = Instant::now();
    }

    /// True when no reply is pending and nothing touched the session for `ttl`
    pub async fn is_idle_for(&self, ttl: Duration) -> bool {
        if self.is_pending().await {
            return false;
        }
        self.last_active.lock().await.elapsed() >= ttl
    }

    /// Append a user turn, wait for the reply and append it.
    ///
    /// Returns the conversation after the assistant turn (reply or
    /// placeholder) has landed. Validation failures return before any
    /// request is made.
    pub async fn send(self: &Arc<Self>, text: &str) -> Result<Conversation, ValidationError> {
        self.touch().await;
        let snapshot = {
            let mut store = self.store.lock().await;
            let snapshot = store.append_user(text)?;
            store.begin_pending();
            snapshot
        };

        // Detached so a caller that goes away cannot strand the pending flag
        let session = Arc::clone(self);
        let turn = tokio::spawn(async move { session.complete_turn(snapshot).await });

        match turn.await {
            Ok(conversation) => Ok(conversation),
            Err(e) => {
                tracing::error!(error = %e, "Reply task did not complete");
                let mut store = self.store.lock().await;
                let conversation = store.append_assistant(ReplyErrorKind::Transport.placeholder());
                store.end_pending();
                Ok(conversation)
            }
        }
    }

    async fn complete_turn(&self, snapshot: Conversation) -> Conversation {
        let outcome = self.client.request_reply(&snapshot, &self.instructions).await;

        let mut store = self.store.lock().await;
        let conversation = match outcome {
            Ok(reply) => store.append_assistant(reply),
            Err(e) => {
                tracing::debug!(kind = ?e.kind, "Substituting placeholder for failed reply");
                store.append_assistant(e.placeholder())
            }
        };
        store.end_pending();
        drop(store);

        self.touch().await;
        conversation
    }

    pub async fn snapshot(&self) -> Conversation {
        self.store.lock().await.snapshot()
    }

    pub async fn is_pending(&self) -> bool {
        self.store.lock().await.is_pending()
    }
}
