use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::SessionId;
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Serialize)]
pub struct SessionMessagesResponse {
    pub session_id: String,
    pub messages: Vec<MessageView>,
}

#[derive(Serialize)]
pub struct MessageView {
    pub id: String,
    pub role: &'static str,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[tracing::instrument(skip(state))]
pub async fn session_messages_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<String>,
) -> Response
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let session_id: SessionId = match session_id.parse() {
        Ok(id) => id,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    let Some(handle) = state.session_store.get(session_id).await else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Session not found: {}", session_id),
        );
    };

    let session = handle.lock().await;
    let messages = session
        .iter()
        .map(|message| MessageView {
            id: message.id().as_uuid().to_string(),
            role: message.role().as_str(),
            content: message.content().to_string(),
            created_at: message.created_at(),
        })
        .collect();

    (
        StatusCode::OK,
        Json(SessionMessagesResponse {
            session_id: session_id.to_string(),
            messages,
        }),
    )
        .into_response()
}
