use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{SpeechError, SpeechSynthesizer};
use crate::presentation::config::{SpeechProvider, SpeechSettings};

use super::google_tts_engine::{GoogleAuth, GoogleTtsEngine};

pub struct SpeechEngineFactory;

impl SpeechEngineFactory {
    /// Builds the configured synthesizer, or `None` when speech output is
    /// disabled. Service-account credentials take precedence over an API key.
    pub fn create(
        settings: &SpeechSettings,
    ) -> Result<Option<Arc<dyn SpeechSynthesizer>>, SpeechError> {
        match settings.provider {
            SpeechProvider::Disabled => {
                tracing::info!("Speech synthesis disabled");
                Ok(None)
            }
            SpeechProvider::Google => {
                let auth = match (&settings.credentials_path, &settings.api_key) {
                    (Some(path), _) => GoogleAuth::from_credentials_file(path)?,
                    (None, Some(key)) => GoogleAuth::ApiKey(key.clone()),
                    (None, None) => {
                        return Err(SpeechError::Credentials(
                            "credentials_path or api_key required for Google Text-to-Speech"
                                .to_string(),
                        ));
                    }
                };
                let engine = GoogleTtsEngine::new(
                    settings.base_url.clone(),
                    auth,
                    Duration::from_secs(settings.request_timeout_secs),
                )?;
                tracing::info!(
                    language = %settings.language_code,
                    "Google Text-to-Speech synthesizer ready"
                );
                Ok(Some(Arc::new(engine)))
            }
        }
    }
}
