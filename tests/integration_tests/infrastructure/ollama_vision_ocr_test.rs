use axum::http::StatusCode;
use base64::Engine as _;
use base64::engine::general_purpose;
use chat_gateway::application::ports::{FileLoader, FileLoaderError};
use chat_gateway::infrastructure::text_processing::{OCR_PROMPT, OllamaVisionOcrAdapter};
use serde_json::json;

use crate::mock_ollama::{MockOllama, MockReply};

const IMAGE: &[u8] = b"\x89PNG\r\n\x1a\nfake image bytes";

fn write_image(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("scan.png");
    std::fs::write(&path, IMAGE).unwrap();
    path
}

#[tokio::test]
async fn given_image_when_extracting_then_sends_base64_image_to_vision_model() {
    let server = MockOllama::start(MockReply::Json(json!({ "response": "  TOTAL 42\n" }))).await;
    let dir = tempfile::tempdir().unwrap();
    let adapter = OllamaVisionOcrAdapter::new(&server.base_url, "llava");

    let text = adapter.extract_text(&write_image(dir.path())).await.unwrap();

    assert_eq!(text, "TOTAL 42");
    let sent = server.requests();
    assert_eq!(sent[0]["model"], "llava");
    assert_eq!(sent[0]["prompt"], OCR_PROMPT);
    assert_eq!(sent[0]["stream"], false);
    assert_eq!(sent[0]["images"][0], general_purpose::STANDARD.encode(IMAGE));
}

#[tokio::test]
async fn given_blank_transcription_when_extracting_then_returns_no_text_found() {
    let server = MockOllama::start(MockReply::Json(json!({ "response": "   " }))).await;
    let dir = tempfile::tempdir().unwrap();
    let adapter = OllamaVisionOcrAdapter::new(&server.base_url, "llava");

    let result = adapter.extract_text(&write_image(dir.path())).await;

    assert!(matches!(result, Err(FileLoaderError::NoTextFound(_))));
}

#[tokio::test]
async fn given_model_error_when_extracting_then_returns_extraction_failed() {
    let server = MockOllama::start(MockReply::Status(StatusCode::NOT_FOUND)).await;
    let dir = tempfile::tempdir().unwrap();
    let adapter = OllamaVisionOcrAdapter::new(&server.base_url, "missing-model");

    let result = adapter.extract_text(&write_image(dir.path())).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}
