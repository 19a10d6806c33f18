use chrono::{DateTime, Utc};

use super::{MessageId, MessageRole};

/// One turn of a conversation. Fields are read-only once the message is
/// stored in a [`ConversationSession`](super::ConversationSession).
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationMessage {
    id: MessageId,
    role: MessageRole,
    content: String,
    created_at: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
