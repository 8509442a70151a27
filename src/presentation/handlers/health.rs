use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::LlmClient;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

pub async fn health_handler<L>(State(state): State<AppState<L>>) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            model: state.generation_service.options().model.clone(),
        }),
    )
}
