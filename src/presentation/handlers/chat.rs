use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use base64::{Engine as _, engine::general_purpose};
use serde::Serialize;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::{ChatError, ChatTurn, TurnNotice, UploadedDocument};
use crate::domain::{ChatModel, ContentType, Document, SessionId, Temperature};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub answer: String,
    pub audio: Option<AudioPayload>,
    pub notices: Vec<TurnNotice>,
    pub used_document_context: bool,
    pub model: &'static str,
    pub temperature: f32,
}

#[derive(Serialize)]
pub struct AudioPayload {
    pub mime_type: &'static str,
    pub content_base64: String,
}

/// Validated multipart form of one chat turn.
struct ChatForm {
    question: String,
    model: ChatModel,
    temperature: Temperature,
    session_id: Option<SessionId>,
    upload: Option<UploadedDocument>,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn chat_handler<F, L>(
    State(state): State<AppState<F, L>>,
    multipart: Multipart,
) -> Response
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let form = match read_chat_form(multipart, state.upload_limit_bytes).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    tracing::debug!(
        question = %sanitize_prompt(&form.question),
        model = %form.model,
        temperature = %form.temperature,
        has_document = form.upload.is_some(),
        "Chat request received"
    );

    let (session_id, handle) = state.session_store.get_or_create(form.session_id).await;

    let turn = ChatTurn {
        question: form.question,
        document: form.upload,
        model: form.model,
        temperature: form.temperature,
    };

    let result = {
        let mut session = handle.lock().await;
        state.chat_service.handle_turn(&mut session, turn).await
    };

    if result.is_err() {
        drop(handle);
        // An aborted turn leaves no message, so nothing should outlive it.
        state.session_store.discard_if_empty(session_id).await;
    }

    match result {
        Ok(outcome) => {
            let audio = outcome.audio.map(|audio| AudioPayload {
                mime_type: audio.encoding.as_mime(),
                content_base64: general_purpose::STANDARD.encode(&audio.bytes),
            });

            (
                StatusCode::OK,
                Json(ChatResponse {
                    session_id: outcome.session_id.to_string(),
                    answer: outcome.answer,
                    audio,
                    notices: outcome.notices,
                    used_document_context: outcome.used_document_context,
                    model: form.model.as_str(),
                    temperature: form.temperature.value(),
                }),
            )
                .into_response()
        }
        Err(ChatError::EmptyQuestion) => {
            error_response(StatusCode::BAD_REQUEST, "Question must not be empty")
        }
        Err(ChatError::Extraction(e)) => {
            tracing::warn!(session_id = %session_id, error = %e, "Turn aborted by extraction failure");
            error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Document could not be processed: {}", e),
            )
        }
    }
}

async fn read_chat_form(
    mut multipart: Multipart,
    upload_limit_bytes: usize,
) -> Result<ChatForm, Response> {
    let mut question: Option<String> = None;
    let mut model = ChatModel::default();
    let mut temperature = Temperature::default();
    let mut session_id = None;
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "question" => {
                question = Some(field.text().await.map_err(multipart_error)?);
            }
            "model" => {
                let raw = field.text().await.map_err(multipart_error)?;
                if !raw.trim().is_empty() {
                    model = raw.parse::<ChatModel>().map_err(|e| {
                        error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
                    })?;
                }
            }
            "temperature" => {
                let raw = field.text().await.map_err(multipart_error)?;
                if !raw.trim().is_empty() {
                    temperature = parse_temperature(&raw)?;
                }
            }
            "session_id" => {
                let raw = field.text().await.map_err(multipart_error)?;
                if !raw.trim().is_empty() {
                    session_id = Some(
                        raw.parse::<SessionId>()
                            .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?,
                    );
                }
            }
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(multipart_error)?;

                // Browsers submit an empty, unnamed part when no file is picked.
                if data.is_empty() && filename.is_empty() {
                    continue;
                }

                if data.len() > upload_limit_bytes {
                    tracing::warn!(size_bytes = data.len(), limit = upload_limit_bytes, "Upload too large");
                    return Err(error_response(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        format!("File exceeds the {} byte upload limit", upload_limit_bytes),
                    ));
                }

                let content_type = resolve_content_type(&mime, &filename).ok_or_else(|| {
                    tracing::warn!(content_type = %mime, filename = %filename, "Unsupported upload");
                    error_response(
                        StatusCode::UNSUPPORTED_MEDIA_TYPE,
                        format!("Unsupported content type: {}", mime),
                    )
                })?;

                let document = Document::new(filename, content_type, data.len() as u64);
                upload = Some(UploadedDocument {
                    document,
                    data: data.to_vec(),
                });
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown form field");
            }
        }
    }

    let question = question.map(|q| q.trim().to_string()).unwrap_or_default();

    if question.is_empty() {
        tracing::warn!("Chat request with empty question");
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "No question provided",
        ));
    }

    if question.contains('\n') {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Question must be a single line",
        ));
    }

    Ok(ChatForm {
        question,
        model,
        temperature,
        session_id,
        upload,
    })
}

fn parse_temperature(raw: &str) -> Result<Temperature, Response> {
    let value: f32 = raw.trim().parse().map_err(|_| {
        error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Invalid temperature: {}", raw),
        )
    })?;

    Temperature::new(value)
        .map_err(|e| error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
}

/// Only PDF uploads are accepted as turn context.
fn resolve_content_type(mime: &str, filename: &str) -> Option<ContentType> {
    ContentType::from_mime(mime)
        .or_else(|| {
            let generic = mime == "application/octet-stream";
            (generic && filename.to_ascii_lowercase().ends_with(".pdf"))
                .then_some(ContentType::Pdf)
        })
        .filter(|content_type| *content_type == ContentType::Pdf)
}

fn multipart_error(e: MultipartError) -> Response {
    tracing::warn!(error = %e, "Failed to read multipart");
    error_response(e.status(), format!("Failed to read multipart: {}", e.body_text()))
}
