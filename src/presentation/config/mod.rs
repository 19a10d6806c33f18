mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    ExtractionSettings, GOOGLE_CREDENTIALS_VAR, LlmSettings, LoggingSettings,
    OPENAI_API_KEY_VAR, ServerSettings, Settings, SettingsError, SpeechProvider,
    SpeechSettings,
};
