use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::application::ports::{SessionHandle, SessionStore};
use crate::domain::{ConversationSession, SessionId};

/// Process-lifetime session registry. Nothing survives a restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: Option<SessionId>) -> (SessionId, SessionHandle) {
        if let Some(id) = id {
            if let Some(handle) = self.get(id).await {
                return (id, handle);
            }
        }

        let id = id.unwrap_or_default();
        let mut sessions = self.sessions.write().await;
        let handle = sessions
            .entry(id)
            .or_insert_with(|| {
                tracing::debug!(session_id = %id, "Session created");
                Arc::new(Mutex::new(ConversationSession::new(id)))
            })
            .clone();

        (id, handle)
    }

    async fn get(&self, id: SessionId) -> Option<SessionHandle> {
        self.sessions.read().await.get(&id).cloned()
    }

    async fn discard_if_empty(&self, id: SessionId) -> bool {
        let mut sessions = self.sessions.write().await;

        let removable = sessions.get(&id).is_some_and(|handle| {
            Arc::strong_count(handle) == 1
                && handle.try_lock().is_ok_and(|session| session.is_empty())
        });

        if removable {
            sessions.remove(&id);
            tracing::debug!(session_id = %id, "Empty session discarded");
        }

        removable
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
