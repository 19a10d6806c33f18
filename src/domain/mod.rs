mod chat_model;
mod conversation_session;
mod document;
mod inference;
mod language;
mod message;
mod message_id;
mod message_role;
mod session_id;
mod speech;
mod temperature;

pub use chat_model::{ChatModel, UnknownModel};
pub use conversation_session::ConversationSession;
pub use document::{ContentType, Document, DocumentId};
pub use inference::{InferenceRequest, InferenceResponse, NormalizedContext, Prompt};
pub use language::Language;
pub use message::ConversationMessage;
pub use message_id::MessageId;
pub use message_role::MessageRole;
pub use session_id::SessionId;
pub use speech::{AudioEncoding, SynthesizedAudio, VoiceGender, VoiceSelection};
pub use temperature::{InvalidTemperature, Temperature};
