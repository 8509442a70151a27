use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use chat_gateway::application::ports::SessionStore;
use chat_gateway::application::services::{ExtractionService, GenerationService};
use chat_gateway::infrastructure::llm::OllamaClient;
use chat_gateway::infrastructure::observability::{TracingConfig, init_tracing};
use chat_gateway::infrastructure::persistence::InMemorySessionStore;
use chat_gateway::infrastructure::text_processing::ExtractorRegistry;
use chat_gateway::presentation::{
    AppState, Environment, RouterOptions, Settings, chat_templates, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load configuration")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        &settings.logging.level,
        settings.logging.enable_json,
    ));

    tracing::info!(
        ollama_host = %settings.ollama.host,
        model = %settings.ollama.model,
        "Configuration loaded"
    );

    let llm_client = Arc::new(OllamaClient::new(&settings.ollama.host));
    tracing::info!(base_url = llm_client.base_url(), "Ollama client ready");
    let session_store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

    let generation_service = Arc::new(GenerationService::new(
        Arc::clone(&llm_client),
        Arc::clone(&session_store),
        settings.generation_options(),
    ));

    let mut extraction_service = ExtractionService::new(ExtractorRegistry::create(
        &settings.ollama.host,
        settings.ollama.ocr_model(),
    ))
    .with_max_chars(settings.extraction.max_chars);
    if let Some(dir) = &settings.extraction.scratch_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create scratch dir {}", dir.display()))?;
        extraction_service = extraction_service.with_scratch_dir(dir.clone());
    }

    let state = AppState {
        generation_service,
        extraction_service: Arc::new(extraction_service),
        session_store,
        templates: Arc::new(chat_templates().context("Failed to load chat page template")?),
    };

    let router = create_router(state, RouterOptions::from(&settings.server));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
