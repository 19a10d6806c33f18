use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::ports::{
    FileLoader, FileLoaderError, LlmClient, SpeechSynthesizer, TextNormalizer,
};
use crate::domain::{
    ChatModel, ConversationSession, Document, InferenceRequest, InferenceResponse, MessageRole,
    NormalizedContext, SessionId, SynthesizedAudio, Temperature, VoiceSelection,
};
use crate::infrastructure::observability::sanitize_prompt;

use super::context_assembler::assemble_prompt;

/// What a turn does when the uploaded document cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionFailurePolicy {
    /// Fail the turn; the session is left untouched.
    #[default]
    Abort,
    /// Answer without document context and attach a notice.
    Degrade,
}

#[derive(Debug, Clone)]
pub struct ChatServiceOptions {
    pub voice: VoiceSelection,
    pub fallback_message: String,
    pub extraction_failure_policy: ExtractionFailurePolicy,
}

#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub document: Document,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub question: String,
    pub document: Option<UploadedDocument>,
    pub model: ChatModel,
    pub temperature: Temperature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    ExtractionFailure,
    InferenceFailure,
    SynthesisFailure,
}

/// User-visible inline notice attached to a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnNotice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct InferenceOutcome {
    pub response: InferenceResponse,
    pub notice: Option<TurnNotice>,
}

impl InferenceOutcome {
    pub fn is_fallback(&self) -> bool {
        self.notice.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub session_id: SessionId,
    pub answer: String,
    pub audio: Option<SynthesizedAudio>,
    pub notices: Vec<TurnNotice>,
    pub used_document_context: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("question must not be empty")]
    EmptyQuestion,
    #[error("document extraction: {0}")]
    Extraction(#[from] FileLoaderError),
}

pub struct ChatService<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    file_loader: Arc<F>,
    normalizer: Arc<dyn TextNormalizer>,
    llm_client: Arc<L>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    options: ChatServiceOptions,
}

impl<F, L> ChatService<F, L>
where
    F: FileLoader,
    L: LlmClient,
{
    pub fn new(
        file_loader: Arc<F>,
        normalizer: Arc<dyn TextNormalizer>,
        llm_client: Arc<L>,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
        options: ChatServiceOptions,
    ) -> Self {
        Self {
            file_loader,
            normalizer,
            llm_client,
            synthesizer,
            options,
        }
    }

    pub fn fallback_message(&self) -> &str {
        &self.options.fallback_message
    }

    pub fn speech_enabled(&self) -> bool {
        self.synthesizer.is_some()
    }

    /// Extracts and normalizes the uploaded document. No document yields an
    /// empty context.
    pub async fn prepare_context(
        &self,
        upload: Option<&UploadedDocument>,
    ) -> Result<NormalizedContext, FileLoaderError> {
        let Some(upload) = upload else {
            return Ok(NormalizedContext::empty());
        };

        let text = self
            .file_loader
            .extract_text(&upload.data, &upload.document)
            .await?;
        let context = self.normalizer.normalize(&text);

        tracing::debug!(
            extracted_chars = text.len(),
            context_tokens = context.tokens().count(),
            language = %self.normalizer.language(),
            "Document context prepared"
        );

        Ok(context)
    }

    /// Asks the completion backend for an answer. Backend failures never
    /// escape: they are logged, turned into a notice and replaced by the
    /// fallback text.
    pub async fn respond(&self, request: &InferenceRequest) -> InferenceOutcome {
        let prompt = assemble_prompt(request);

        match self
            .llm_client
            .complete(&prompt, request.model, request.temperature)
            .await
        {
            Ok(response) => InferenceOutcome {
                response,
                notice: None,
            },
            Err(e) => {
                tracing::error!(error = %e, model = %request.model, "Chat completion failed");
                InferenceOutcome {
                    response: InferenceResponse::new(self.options.fallback_message.clone()),
                    notice: Some(TurnNotice {
                        kind: NoticeKind::InferenceFailure,
                        message: format!("Error al comunicarse con OpenAI: {e}"),
                    }),
                }
            }
        }
    }

    #[tracing::instrument(
        skip(self, session, turn),
        fields(
            session_id = %session.id(),
            model = %turn.model,
            temperature = %turn.temperature,
            has_document = turn.document.is_some(),
        )
    )]
    pub async fn handle_turn(
        &self,
        session: &mut ConversationSession,
        turn: ChatTurn,
    ) -> Result<TurnOutcome, ChatError> {
        if turn.question.trim().is_empty() {
            return Err(ChatError::EmptyQuestion);
        }

        tracing::debug!(question = %sanitize_prompt(&turn.question), "Processing chat turn");

        let mut notices = Vec::new();

        let context = match self.prepare_context(turn.document.as_ref()).await {
            Ok(context) => context,
            Err(e) => match self.options.extraction_failure_policy {
                ExtractionFailurePolicy::Abort => {
                    tracing::warn!(error = %e, "Document extraction failed, aborting turn");
                    return Err(ChatError::Extraction(e));
                }
                ExtractionFailurePolicy::Degrade => {
                    tracing::warn!(error = %e, "Document extraction failed, continuing without context");
                    notices.push(TurnNotice {
                        kind: NoticeKind::ExtractionFailure,
                        message: format!("No se pudo leer el documento: {e}"),
                    });
                    NormalizedContext::empty()
                }
            },
        };
        let used_document_context = !context.is_empty();

        let request = InferenceRequest {
            question: turn.question,
            context,
            model: turn.model,
            temperature: turn.temperature,
        };

        let outcome = self.respond(&request).await;
        let fell_back = outcome.is_fallback();
        notices.extend(outcome.notice);
        let answer = outcome.response.text;

        session.append(MessageRole::User, request.question);
        session.append(MessageRole::Assistant, answer.clone());

        let audio = if fell_back {
            None
        } else {
            self.render_speech(&answer, &mut notices).await
        };

        tracing::info!(
            messages = session.len(),
            notices = notices.len(),
            audio = audio.is_some(),
            "Chat turn completed"
        );

        Ok(TurnOutcome {
            session_id: session.id(),
            answer,
            audio,
            notices,
            used_document_context,
        })
    }

    async fn render_speech(
        &self,
        text: &str,
        notices: &mut Vec<TurnNotice>,
    ) -> Option<SynthesizedAudio> {
        let synthesizer = self.synthesizer.as_ref()?;

        match synthesizer.synthesize(text, &self.options.voice).await {
            Ok(audio) => Some(audio),
            Err(e) => {
                tracing::warn!(error = %e, "Speech synthesis failed, replying with text only");
                notices.push(TurnNotice {
                    kind: NoticeKind::SynthesisFailure,
                    message: format!("No se pudo generar el audio: {e}"),
                });
                None
            }
        }
    }
}
