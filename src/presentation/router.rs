use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{FileLoader, LlmClient};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    chat_handler, health_handler, models_handler, session_messages_handler,
};
use crate::presentation::state::AppState;

/// Multipart framing on top of the document itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router<F, L>(state: AppState<F, L>) -> Router
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.upload_limit_bytes + FORM_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/models", get(models_handler))
        .route("/api/v1/chat", post(chat_handler::<F, L>).layer(body_limit))
        .route(
            "/api/v1/sessions/{session_id}/messages",
            get(session_messages_handler::<F, L>),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
