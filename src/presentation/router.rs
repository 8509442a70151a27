use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::LlmClient;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::config::ServerSettings;
use crate::presentation::handlers::{
    generate_handler, health_handler, index_handler, upload_file_handler,
};
use crate::presentation::state::AppState;

#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl From<&ServerSettings> for RouterOptions {
    fn from(server: &ServerSettings) -> Self {
        Self {
            static_dir: server.static_dir.clone(),
            max_upload_bytes: server.max_upload_bytes,
        }
    }
}

pub fn create_router<L>(state: AppState<L>, options: RouterOptions) -> Router
where
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(index_handler::<L>))
        .route("/health", get(health_handler::<L>))
        .route("/upload_file", post(upload_file_handler::<L>))
        .route("/generate", post(generate_handler::<L>))
        .nest_service("/static", ServeDir::new(options.static_dir))
        .layer(DefaultBodyLimit::max(options.max_upload_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
