use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use gcp_auth::{CustomServiceAccount, TokenProvider};
use serde::{Deserialize, Serialize};

use crate::application::ports::{SpeechError, SpeechSynthesizer};
use crate::domain::{SynthesizedAudio, VoiceSelection};

pub const GOOGLE_TTS_BASE_URL: &str = "https://texttospeech.googleapis.com";
const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// How requests to the Text-to-Speech API are authorized.
#[derive(Clone)]
pub enum GoogleAuth {
    ServiceAccount(Arc<CustomServiceAccount>),
    ApiKey(String),
}

impl GoogleAuth {
    pub fn from_credentials_file(path: &Path) -> Result<Self, SpeechError> {
        let account = CustomServiceAccount::from_file(path).map_err(|e| {
            SpeechError::Credentials(format!("{}: {}", path.display(), e))
        })?;
        Ok(Self::ServiceAccount(Arc::new(account)))
    }
}

pub struct GoogleTtsEngine {
    client: reqwest::Client,
    endpoint: String,
    auth: GoogleAuth,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceParams<'a>,
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceParams<'a> {
    language_code: &'a str,
    ssml_gender: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

impl GoogleTtsEngine {
    pub fn new(
        base_url: Option<String>,
        auth: GoogleAuth,
        request_timeout: Duration,
    ) -> Result<Self, SpeechError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| SpeechError::ApiRequestFailed(format!("client setup: {e}")))?;

        let base_url = base_url.unwrap_or_else(|| GOOGLE_TTS_BASE_URL.to_string());
        let endpoint = format!("{}/v1/text:synthesize", base_url.trim_end_matches('/'));

        Ok(Self {
            client,
            endpoint,
            auth,
        })
    }

    async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, SpeechError> {
        match &self.auth {
            GoogleAuth::ServiceAccount(account) => {
                let token = account
                    .token(&[CLOUD_PLATFORM_SCOPE])
                    .await
                    .map_err(|e| SpeechError::Credentials(format!("access token: {e}")))?;
                Ok(request.bearer_auth(token.as_str()))
            }
            GoogleAuth::ApiKey(key) => Ok(request.query(&[("key", key.as_str())])),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsEngine {
    #[tracing::instrument(
        skip(self, text, voice),
        fields(language = %voice.language_code, encoding = voice.encoding.as_api_str())
    )]
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSelection,
    ) -> Result<SynthesizedAudio, SpeechError> {
        let body = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceParams {
                language_code: &voice.language_code,
                ssml_gender: voice.gender.as_api_str(),
            },
            audio_config: AudioConfig {
                audio_encoding: voice.encoding.as_api_str(),
            },
        };

        tracing::debug!(chars = text.len(), "Sending text to Google Text-to-Speech");

        let request = self.authorize(self.client.post(&self.endpoint)).await?;
        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| SpeechError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SpeechError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("parse response: {}", e)))?;

        let bytes = general_purpose::STANDARD
            .decode(result.audio_content.as_bytes())
            .map_err(|e| SpeechError::InvalidResponse(format!("audio content: {}", e)))?;

        tracing::info!(bytes = bytes.len(), "Speech synthesis completed");

        Ok(SynthesizedAudio {
            encoding: voice.encoding,
            bytes,
        })
    }
}
