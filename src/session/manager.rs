//! In-memory registry of live chat sessions

use super::ChatSession;
use crate::reply::ReplyClient;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Manager for all chat sessions
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<ChatSession>>>,
    client: Arc<dyn ReplyClient>,
    instructions: Arc<str>,
    welcome: String,
}

impl SessionManager {
    pub fn new(client: Arc<dyn ReplyClient>, instructions: &str, welcome: impl Into<String>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            client,
            instructions: Arc::from(instructions),
            welcome: welcome.into(),
        }
    }

    /// Start a new session seeded with the welcome message
    pub async fn create(&self) -> (String, Arc<ChatSession>) {
        let id = uuid::Uuid::new_v4().to_string();
        let session = Arc::new(ChatSession::new(
            &self.welcome,
            self.client.clone(),
            self.instructions.clone(),
        ));

        let mut sessions = self.sessions.write().await;
        sessions.insert(id.clone(), session.clone());
        tracing::info!(session_id = %id, live_sessions = sessions.len(), "Session created");

        (id, session)
    }

    /// Look up a session. A hit counts as activity.
    pub async fn get(&self, id: &str) -> Option<Arc<ChatSession>> {
        let session = self.sessions.read().await.get(id).cloned()?;
        session.touch().await;
        Some(session)
    }

    /// Discard a session. Returns false if it did not exist.
    pub async fn remove(&self, id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, live_sessions = sessions.len(), "Session discarded");
        }
        removed
    }

    #[allow(dead_code)] // API completeness
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions idle for at least `ttl`. Sessions awaiting a reply are kept.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;

        let mut expired = Vec::new();
        for (id, session) in sessions.iter() {
            if session.is_idle_for(ttl).await {
                expired.push(id.clone());
            }
        }
        for id in &expired {
            sessions.remove(id);
        }

        if !expired.is_empty() {
            tracing::info!(
                evicted = expired.len(),
                live_sessions = sessions.len(),
                "Evicted idle sessions"
            );
        }
        expired.len()
    }

    /// Sweep idle sessions in the background every `period`
    pub fn start_eviction_task(self: &Arc<Self>, ttl: Duration, period: Duration) {
        let manager = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                manager.evict_idle(ttl).await;
            }
        });
    }
}
