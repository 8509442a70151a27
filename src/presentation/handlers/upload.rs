use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::LlmClient;
use crate::application::services::ExtractionError;
use crate::domain::FileKind;
use crate::presentation::state::AppState;

use super::error::error_response;

const FILE_FIELD: &str = "file";
const UNREADABLE_UPLOAD: &str = "No se pudo leer el archivo enviado";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_type: FileKind,
    pub file_text: String,
    pub file_name: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_file_handler<L>(
    State(state): State<AppState<L>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let (file_name, data) = loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::warn!("Upload request with no file field");
                return error_response(StatusCode::BAD_REQUEST, "No se ha enviado ningún archivo");
            }
            Err(e) => {
                tracing::warn!(error = %e, status = %e.status(), "Failed to read multipart");
                return error_response(e.status(), UNREADABLE_UPLOAD);
            }
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("unknown").to_string();
        match field.bytes().await {
            Ok(data) => break (file_name, data),
            Err(e) => {
                tracing::warn!(error = %e, status = %e.status(), "Failed to read file bytes");
                return error_response(e.status(), UNREADABLE_UPLOAD);
            }
        }
    };

    tracing::debug!(file_name = %file_name, bytes = data.len(), "File upload received");

    match state.extraction_service.extract(&file_name, &data).await {
        Ok(file) => (
            StatusCode::OK,
            Json(UploadResponse {
                file_type: file.kind,
                file_text: file.text,
                file_name: file.name,
            }),
        )
            .into_response(),
        Err(ExtractionError::UnsupportedFormat(extension)) => {
            tracing::warn!(file_name = %file_name, extension = %extension, "Unsupported file format");
            error_response(StatusCode::BAD_REQUEST, "Formato de archivo no soportado")
        }
        Err(e) => {
            tracing::error!(error = %e, file_name = %file_name, "Failed to process file");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error al procesar el archivo",
            )
        }
    }
}
