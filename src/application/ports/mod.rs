mod file_loader;
mod llm_client;
mod session_store;
mod speech_synthesizer;
mod text_normalizer;

pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use session_store::{SessionHandle, SessionStore};
pub use speech_synthesizer::{SpeechError, SpeechSynthesizer};
pub use text_normalizer::TextNormalizer;
