use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use chat_gateway::application::ports::SessionStore;
use chat_gateway::application::services::{
    ExtractionService, GenerationOptions, GenerationService,
};
use chat_gateway::domain::SessionId;
use chat_gateway::infrastructure::llm::OllamaClient;
use chat_gateway::infrastructure::persistence::InMemorySessionStore;
use chat_gateway::infrastructure::text_processing::ExtractorRegistry;
use chat_gateway::presentation::{AppState, RouterOptions, chat_templates, create_router};

use crate::mock_ollama::{MockOllama, MockReply, closed_port_url};

const BOUNDARY: &str = "FLOWBOUNDARY";

fn gateway(ollama_url: &str, store: Arc<InMemorySessionStore>) -> axum::Router {
    let session_store: Arc<dyn SessionStore> = store;
    let generation_service = Arc::new(GenerationService::new(
        Arc::new(OllamaClient::new(ollama_url)),
        Arc::clone(&session_store),
        GenerationOptions::default(),
    ));
    let extraction_service = Arc::new(ExtractionService::new(ExtractorRegistry::create(
        ollama_url, "llava",
    )));

    create_router(
        AppState {
            generation_service,
            extraction_service,
            session_store,
            templates: Arc::new(chat_templates().unwrap()),
        },
        RouterOptions {
            static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
            max_upload_bytes: 1024 * 1024,
        },
    )
}

fn upload(file_name: &str, content: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload_file")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn generate(session: &SessionId, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, format!("session_id={session}"))
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_uploaded_txt_when_generating_then_model_sees_file_and_exchange_is_recorded() {
    let server = MockOllama::start(MockReply::Json(json!({ "model": "m", "response": "ok" }))).await;
    let store = Arc::new(InMemorySessionStore::new());
    let app = gateway(&server.base_url, Arc::clone(&store));
    let session = SessionId::new();

    let uploaded = json_body(
        app.clone()
            .oneshot(upload("notes.txt", b"hello"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(uploaded["file_type"], "documento");

    let response = app
        .oneshot(generate(
            &session,
            json!({
                "prompt": "summarize",
                "file_type": uploaded["file_type"],
                "file_name": uploaded["file_name"],
                "file_text": uploaded["file_text"],
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "model": "m", "response": "ok", "sources": null, "context_used": true })
    );

    let prompt = server.requests()[0]["prompt"].as_str().unwrap().to_string();
    assert!(prompt.contains("Texto extraido del archivo con nombre notes.txt:\nhello"));
    assert!(prompt.contains("Input (Responde con el idioma que tenga este input): summarize"));

    let history = store.recent(&session, 4).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].user_input, "summarize");
    assert_eq!(history[0].model_response, "ok");
}

#[tokio::test]
async fn given_uploaded_image_when_extracting_then_text_comes_from_vision_model() {
    let server = MockOllama::start(MockReply::Json(json!({ "response": "FACTURA 001" }))).await;
    let app = gateway(&server.base_url, Arc::new(InMemorySessionStore::new()));

    let response = app.oneshot(upload("scan.JPG", b"\xff\xd8\xff")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "file_type": "imagen", "file_text": "FACTURA 001", "file_name": "scan.JPG" })
    );
    assert_eq!(server.requests()[0]["model"], "llava");
}

#[tokio::test]
async fn given_model_server_down_when_generating_then_returns_503_and_records_nothing() {
    let store = Arc::new(InMemorySessionStore::new());
    let app = gateway(&closed_port_url().await, Arc::clone(&store));
    let session = SessionId::new();

    let response = app
        .oneshot(generate(&session, json!({ "prompt": "hola" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        json_body(response).await,
        json!({ "detail": "Servicio de modelo no disponible" })
    );
    assert!(store.recent(&session, 4).await.unwrap().is_empty());
}

#[tokio::test]
async fn given_model_server_error_status_when_generating_then_returns_503() {
    let server = MockOllama::start(MockReply::Status(StatusCode::INTERNAL_SERVER_ERROR)).await;
    let app = gateway(&server.base_url, Arc::new(InMemorySessionStore::new()));

    let response = app
        .oneshot(generate(&SessionId::new(), json!({ "prompt": "hola" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn given_second_turn_when_generating_then_prompt_carries_previous_exchange() {
    let server = MockOllama::start(MockReply::Json(json!({ "model": "m", "response": "ok" }))).await;
    let app = gateway(&server.base_url, Arc::new(InMemorySessionStore::new()));
    let session = SessionId::new();

    app.clone()
        .oneshot(generate(&session, json!({ "prompt": "primera" })))
        .await
        .unwrap();
    app.oneshot(generate(&session, json!({ "prompt": "segunda" })))
        .await
        .unwrap();

    let requests = server.requests();
    let first = requests[0]["prompt"].as_str().unwrap();
    let second = requests[1]["prompt"].as_str().unwrap();
    assert!(first.contains("No hay historial previo."));
    assert!(second.contains("Usuario: primera"));
    assert!(second.contains("Modelo: ok"));
}

#[tokio::test]
async fn given_model_server_non_json_reply_when_generating_then_returns_503_and_records_nothing() {
    let server = MockOllama::start(MockReply::Raw("<html>proxy error</html>")).await;
    let store = Arc::new(InMemorySessionStore::new());
    let app = gateway(&server.base_url, Arc::clone(&store));
    let session = SessionId::new();

    let response = app
        .oneshot(generate(&session, json!({ "prompt": "hi" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        json_body(response).await,
        json!({ "detail": "Servicio de modelo no disponible" })
    );
    assert!(store.recent(&session, 4).await.unwrap().is_empty());
}
