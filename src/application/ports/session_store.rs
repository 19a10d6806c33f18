use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConversationSession, SessionId};

/// Shared handle to one session. Holding the lock for a whole turn keeps the
/// session's turns strictly sequential.
pub type SessionHandle = Arc<Mutex<ConversationSession>>;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session for `id`, creating an empty one when `id` is
    /// `None` or unknown.
    async fn get_or_create(&self, id: Option<SessionId>) -> (SessionId, SessionHandle);

    async fn get(&self, id: SessionId) -> Option<SessionHandle>;

    /// Forgets the session when it holds no messages and no turn still
    /// references it. Returns whether it was removed.
    async fn discard_if_empty(&self, id: SessionId) -> bool;

    async fn len(&self) -> usize;
}
