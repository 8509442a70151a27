use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Error body shared by every endpoint: `{ "detail": "..." }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

pub fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
        .into_response()
}
