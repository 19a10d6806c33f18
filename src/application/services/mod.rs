mod chat_service;
mod context_assembler;

pub use chat_service::{
    ChatError, ChatService, ChatServiceOptions, ChatTurn, ExtractionFailurePolicy,
    InferenceOutcome, NoticeKind, TurnNotice, TurnOutcome, UploadedDocument,
};
pub use context_assembler::{PERSONA_INSTRUCTION, assemble_prompt};
