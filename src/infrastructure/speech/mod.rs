mod google_tts_engine;
mod speech_engine_factory;

pub use google_tts_engine::{GOOGLE_TTS_BASE_URL, GoogleAuth, GoogleTtsEngine};
pub use speech_engine_factory::SpeechEngineFactory;
