use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::application::ports::LlmClient;
use crate::application::services::{FileContext, GenerationError, GenerationRequest};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::error_response;
use super::session::resolve_session;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub max_tokens: Option<u32>,
    pub file_type: Option<String>,
    pub file_name: Option<String>,
    pub file_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub model: String,
    pub response: String,
    /// Always `null`; kept for clients that render source lists.
    pub sources: Option<Vec<String>>,
    pub context_used: bool,
}

#[tracing::instrument(skip(state, jar, request))]
pub async fn generate_handler<L>(
    State(state): State<AppState<L>>,
    jar: CookieJar,
    Json(request): Json<GenerateRequest>,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let (session, jar) = resolve_session(jar);

    tracing::info!(
        session_id = %session,
        prompt = %sanitize_prompt(&request.prompt),
        "Processing generation request"
    );

    let file = FileContext::from_request(
        request.file_type.as_deref(),
        request.file_name.as_deref(),
        request.file_text.as_deref(),
    );

    let generation = GenerationRequest {
        prompt: request.prompt,
        max_tokens: request.max_tokens,
        file,
    };

    match state.generation_service.generate(&session, generation).await {
        Ok(result) => (
            jar,
            Json(GenerateResponse {
                model: result.model,
                response: result.response,
                sources: None,
                context_used: result.context_used,
            }),
        )
            .into_response(),
        Err(GenerationError::ModelUnavailable(e)) => {
            tracing::error!(error = %e, "Model server unavailable");
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "Servicio de modelo no disponible",
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Generation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error interno del servidor")
        }
    }
}
