#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use galatea::application::ports::{
    FileLoader, FileLoaderError, LlmClient, LlmClientError, SpeechError, SpeechSynthesizer,
    TextNormalizer,
};
use galatea::application::services::{ChatService, ChatServiceOptions, ExtractionFailurePolicy};
use galatea::domain::{
    AudioEncoding, ChatModel, Document, InferenceResponse, Language, Prompt, SynthesizedAudio,
    Temperature, VoiceSelection,
};
use galatea::infrastructure::text_processing::SnowballNormalizer;

pub const TEST_FALLBACK_MESSAGE: &str = "Lo siento, no puedo procesar tu solicitud en este momento.";

/// Treats the uploaded bytes as UTF-8 text.
pub struct MockFileLoader;

#[async_trait::async_trait]
impl FileLoader for MockFileLoader {
    async fn extract_text(&self, data: &[u8], _doc: &Document) -> Result<String, FileLoaderError> {
        String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))
    }
}

pub struct FailingFileLoader;

#[async_trait::async_trait]
impl FileLoader for FailingFileLoader {
    async fn extract_text(&self, _data: &[u8], _doc: &Document) -> Result<String, FileLoaderError> {
        Err(FileLoaderError::ExtractionFailed(
            "failed to parse PDF: broken xref".to_string(),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: Prompt,
    pub model: ChatModel,
    pub temperature: Temperature,
}

pub struct MockLlmClient {
    answer: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockLlmClient {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        prompt: &Prompt,
        model: ChatModel,
        temperature: Temperature,
    ) -> Result<InferenceResponse, LlmClientError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.clone(),
            model,
            temperature,
        });

        match &self.answer {
            Some(answer) => Ok(InferenceResponse::new(answer.clone())),
            None => Err(LlmClientError::ApiRequestFailed(
                "HTTP 500 Internal Server Error: upstream unavailable".to_string(),
            )),
        }
    }
}

pub struct MockSynthesizer;

#[async_trait::async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSelection,
    ) -> Result<SynthesizedAudio, SpeechError> {
        Ok(SynthesizedAudio {
            encoding: voice.encoding,
            bytes: text.as_bytes().to_vec(),
        })
    }
}

pub struct FailingSynthesizer;

#[async_trait::async_trait]
impl SpeechSynthesizer for FailingSynthesizer {
    async fn synthesize(
        &self,
        _text: &str,
        _voice: &VoiceSelection,
    ) -> Result<SynthesizedAudio, SpeechError> {
        Err(SpeechError::ApiRequestFailed(
            "status 403: permission denied".to_string(),
        ))
    }
}

pub fn spanish_normalizer() -> Arc<dyn TextNormalizer> {
    Arc::new(SnowballNormalizer::new(Language::Spanish))
}

pub fn test_options(policy: ExtractionFailurePolicy) -> ChatServiceOptions {
    ChatServiceOptions {
        voice: VoiceSelection {
            language_code: "es-ES".to_string(),
            gender: Default::default(),
            encoding: AudioEncoding::Mp3,
        },
        fallback_message: TEST_FALLBACK_MESSAGE.to_string(),
        extraction_failure_policy: policy,
    }
}

pub fn chat_service<F: FileLoader>(
    file_loader: F,
    llm_client: Arc<MockLlmClient>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    policy: ExtractionFailurePolicy,
) -> ChatService<F, MockLlmClient> {
    ChatService::new(
        Arc::new(file_loader),
        spanish_normalizer(),
        llm_client,
        synthesizer,
        test_options(policy),
    )
}
