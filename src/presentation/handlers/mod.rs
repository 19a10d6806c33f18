mod chat;
mod error;
mod health;
mod models;
mod sessions;

pub use chat::{AudioPayload, ChatResponse, chat_handler};
pub use error::{ErrorResponse, error_response};
pub use health::health_handler;
pub use models::models_handler;
pub use sessions::session_messages_handler;
