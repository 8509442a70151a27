use async_trait::async_trait;

use crate::domain::{ConversationEntry, SessionId};

/// Per-session conversation history.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn record(
        &self,
        session: &SessionId,
        entry: ConversationEntry,
    ) -> Result<(), SessionStoreError>;

    /// Last `limit` entries in creation order. Unknown sessions yield an empty list.
    async fn recent(
        &self,
        session: &SessionId,
        limit: usize,
    ) -> Result<Vec<ConversationEntry>, SessionStoreError>;

    async fn clear(&self, session: &SessionId) -> Result<(), SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
