use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use config::Environment as EnvironmentSource;
use serde::Deserialize;

use crate::application::services::{ChatServiceOptions, ExtractionFailurePolicy};
use crate::domain::{AudioEncoding, Language, VoiceGender, VoiceSelection};

use super::Environment;

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const GOOGLE_CREDENTIALS_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

const DEFAULT_FALLBACK_MESSAGE: &str = "Lo siento, no puedo procesar tu solicitud en este momento.";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub speech: SpeechSettings,
    pub extraction: ExtractionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub api_key: String,
    pub base_url: Option<String>,
    pub request_timeout_secs: u64,
    pub fallback_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    Google,
    Disabled,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechSettings {
    pub provider: SpeechProvider,
    pub credentials_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub language_code: String,
    pub voice_gender: VoiceGender,
    pub audio_encoding: AudioEncoding,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub language: Language,
    pub max_upload_mb: usize,
    pub timeout_secs: u64,
    pub failure_policy: ExtractionFailurePolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub json_format: bool,
    pub filter: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("missing required secret {0}")]
    MissingSecret(&'static str),
    #[error("credentials file not found: {0}")]
    CredentialsFileNotFound(PathBuf),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

impl Settings {
    /// Defaults, then `appsettings.{environment}.toml`, then `APP_*`
    /// variables (`APP_SERVER__PORT=8080`), then the two conventional secret
    /// variables. The result is validated.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let builder = Self::defaults()?
            .add_source(File::with_name(&environment.settings_file_stem()).required(false))
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("llm.api_key", std::env::var(OPENAI_API_KEY_VAR).ok())?
            .set_override_option(
                "speech.credentials_path",
                std::env::var(GOOGLE_CREDENTIALS_VAR).ok(),
            )?;

        Self::from_builder(builder)
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("llm.request_timeout_secs", 60)?
            .set_default("llm.fallback_message", DEFAULT_FALLBACK_MESSAGE)?
            .set_default("speech.provider", "google")?
            .set_default("speech.language_code", "es-ES")?
            .set_default("speech.voice_gender", "female")?
            .set_default("speech.audio_encoding", "mp3")?
            .set_default("speech.request_timeout_secs", 60)?
            .set_default("extraction.language", "spanish")?
            .set_default("extraction.max_upload_mb", 20)?
            .set_default("extraction.timeout_secs", 30)?
            .set_default("extraction.failure_policy", "abort")?
            .set_default("logging.json_format", false)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Startup checks: both backend secrets must be usable before the
    /// server accepts traffic.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.llm.api_key.trim().is_empty() {
            return Err(SettingsError::MissingSecret(OPENAI_API_KEY_VAR));
        }

        if self.speech.provider == SpeechProvider::Google {
            match (&self.speech.credentials_path, &self.speech.api_key) {
                (Some(path), _) if !path.is_file() => {
                    return Err(SettingsError::CredentialsFileNotFound(path.clone()));
                }
                (None, None) => return Err(SettingsError::MissingSecret(GOOGLE_CREDENTIALS_VAR)),
                _ => {}
            }
        }

        if self.extraction.max_upload_mb == 0 {
            return Err(SettingsError::Invalid(
                "extraction.max_upload_mb must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn voice(&self) -> VoiceSelection {
        VoiceSelection {
            language_code: self.speech.language_code.clone(),
            gender: self.speech.voice_gender,
            encoding: self.speech.audio_encoding,
        }
    }

    pub fn chat_options(&self) -> ChatServiceOptions {
        ChatServiceOptions {
            voice: self.voice(),
            fallback_message: self.llm.fallback_message.clone(),
            extraction_failure_policy: self.extraction.failure_policy,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.extraction.max_upload_mb * 1024 * 1024
    }
}
