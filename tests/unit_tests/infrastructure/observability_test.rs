use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware;
use axum::routing::get;
use chat_gateway::infrastructure::observability::{
    REQUEST_ID_HEADER, RequestId, TracingConfig, request_id_middleware, sanitize_prompt,
};
use tower::ServiceExt;

#[test]
fn given_short_prompt_when_sanitizing_then_returns_trimmed_prompt() {
    assert_eq!(sanitize_prompt("  hola  "), "hola");
}

#[test]
fn given_blank_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_and_reports_length() {
    let prompt = "a".repeat(250);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.starts_with(&"a".repeat(100)));
    assert!(sanitized.ends_with("... (250 chars total)"));
}

#[test]
fn given_multibyte_prompt_when_truncating_then_does_not_split_characters() {
    let prompt = "ñ".repeat(150);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.starts_with(&"ñ".repeat(100)));
    assert!(sanitized.contains("(150 chars total)"));
}

#[test]
fn given_secrets_when_sanitizing_then_redacts_them() {
    let sanitized = sanitize_prompt("Authorization: Bearer abc123 password=hunter2&x=1");

    assert!(sanitized.contains("Bearer [REDACTED]"));
    assert!(sanitized.contains("password=[REDACTED]&x=1"));
    assert!(!sanitized.contains("abc123"));
    assert!(!sanitized.contains("hunter2"));
}

#[test]
fn given_level_when_building_tracing_config_then_directive_includes_crate_targets() {
    let config = TracingConfig::new("test", "warn", true);

    assert_eq!(config.environment, "test");
    assert!(config.json_format);
    assert_eq!(
        config.default_directive,
        "warn,chat_gateway=debug,tower_http=debug"
    );
}

fn echo_router() -> Router {
    Router::new()
        .route(
            "/",
            get(|axum::Extension(id): axum::Extension<RequestId>| async move { id.0 }),
        )
        .layer(middleware::from_fn(request_id_middleware))
}

#[tokio::test]
async fn given_request_without_id_when_handled_then_mints_and_echoes_one() {
    let response = echo_router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(uuid::Uuid::parse_str(&header).is_ok());

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body, header.as_bytes());
}

#[tokio::test]
async fn given_request_with_id_when_handled_then_propagates_it() {
    let response = echo_router()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, "trace-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "trace-42");
}

#[tokio::test]
async fn given_oversized_request_id_when_handled_then_replaces_it() {
    let oversized = "x".repeat(200);

    let response = echo_router()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, oversized.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let echoed = response.headers().get(REQUEST_ID_HEADER).unwrap();
    assert_ne!(echoed, oversized.as_str());
    assert!(uuid::Uuid::parse_str(echoed.to_str().unwrap()).is_ok());
}

#[test]
fn given_repeated_secrets_when_sanitizing_then_redacts_every_occurrence() {
    let sanitized = sanitize_prompt("token=aaa then token=bbb; session_id=ccc");

    assert_eq!(
        sanitized,
        "token=[REDACTED] then token=[REDACTED]; session_id=[REDACTED]"
    );
}
