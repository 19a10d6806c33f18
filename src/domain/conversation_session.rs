use chrono::{DateTime, Utc};

use super::{ConversationMessage, MessageRole, SessionId};

/// Append-only, chronologically ordered chat history of one user session.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: SessionId,
    messages: Vec<ConversationMessage>,
    created_at: DateTime<Utc>,
}

impl ConversationSession {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn append(
        &mut self,
        role: MessageRole,
        content: impl Into<String>,
    ) -> &ConversationMessage {
        let index = self.messages.len();
        self.messages.push(ConversationMessage::new(role, content));
        &self.messages[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversationMessage> {
        self.messages.iter()
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
