use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient, SessionStore};
use crate::application::services::ChatService;

pub struct AppState<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    pub chat_service: Arc<ChatService<F, L>>,
    pub session_store: Arc<dyn SessionStore>,
    pub upload_limit_bytes: usize,
}

impl<F, L> Clone for AppState<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            chat_service: Arc::clone(&self.chat_service),
            session_store: Arc::clone(&self.session_store),
            upload_limit_bytes: self.upload_limit_bytes,
        }
    }
}
