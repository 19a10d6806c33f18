use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use galatea::application::ports::TextNormalizer;
use galatea::application::services::ChatService;
use galatea::infrastructure::llm::OpenAiClient;
use galatea::infrastructure::observability::{TracingConfig, init_tracing};
use galatea::infrastructure::persistence::InMemorySessionStore;
use galatea::infrastructure::speech::SpeechEngineFactory;
use galatea::infrastructure::text_processing::{PdfAdapter, SnowballNormalizer};
use galatea::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load configuration")?;

    init_tracing(&TracingConfig::from_settings(&settings.logging, environment))?;

    let file_loader = Arc::new(PdfAdapter::with_timeout(Duration::from_secs(
        settings.extraction.timeout_secs,
    )));
    let normalizer: Arc<dyn TextNormalizer> =
        Arc::new(SnowballNormalizer::new(settings.extraction.language));
    let llm_client = Arc::new(OpenAiClient::new(
        settings.llm.api_key.clone(),
        settings.llm.base_url.clone(),
        Duration::from_secs(settings.llm.request_timeout_secs),
    )?);
    let synthesizer = SpeechEngineFactory::create(&settings.speech)
        .context("failed to initialize speech synthesis")?;

    let chat_service = Arc::new(ChatService::new(
        file_loader,
        normalizer,
        llm_client,
        synthesizer,
        settings.chat_options(),
    ));

    let state = AppState {
        chat_service,
        session_store: Arc::new(InMemorySessionStore::new()),
        upload_limit_bytes: settings.max_upload_bytes(),
    };

    let router = create_router(state);

    let listener = TcpListener::bind((settings.server.host.as_str(), settings.server.port)).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        language = %settings.extraction.language,
        "Listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
