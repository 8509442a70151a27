use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{SessionStore, SessionStoreError};
use crate::domain::{ConversationEntry, SessionId};

/// Process-local history map. Contents are lost on restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    histories: RwLock<HashMap<SessionId, Vec<ConversationEntry>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn session_count(&self) -> usize {
        self.histories.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn record(
        &self,
        session: &SessionId,
        entry: ConversationEntry,
    ) -> Result<(), SessionStoreError> {
        let mut histories = self.histories.write().await;
        histories.entry(session.clone()).or_default().push(entry);
        Ok(())
    }

    async fn recent(
        &self,
        session: &SessionId,
        limit: usize,
    ) -> Result<Vec<ConversationEntry>, SessionStoreError> {
        let histories = self.histories.read().await;
        let entries = match histories.get(session) {
            Some(entries) => entries,
            None => return Ok(Vec::new()),
        };

        let start = entries.len().saturating_sub(limit);
        Ok(entries[start..].to_vec())
    }

    async fn clear(&self, session: &SessionId) -> Result<(), SessionStoreError> {
        let removed = self.histories.write().await.remove(session);
        if let Some(entries) = removed {
            tracing::debug!(session_id = %session, entries = entries.len(), "Session history cleared");
        }
        Ok(())
    }
}
