//! Middleware tests.

use axum::{
    body::Body,
    extract::Request as ExtractRequest,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use tower::ServiceExt;

use super::*;

/// Test app with every middleware layer, outermost last:
/// request id, metrics, tracing, logging.
fn test_app_with_middleware() -> Router {
    Router::new()
        .route("/", get(|| async { "OK" }))
        .route(
            "/unavailable",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
        .layer(RequestLoggingLayer::new())
        .layer(TracingLayer::new())
        .layer(MetricsLayer::new())
        .layer(RequestIdLayer::new())
}

/// Value of the request counter whose labels match, from rendered output.
pub(super) fn request_count(output: &str, method: &str, path: &str, class: &str) -> Option<u64> {
    let wanted = [
        format!(r#"method="{method}""#),
        format!(r#"path="{path}""#),
        format!(r#"status_class="{class}""#),
    ];
    output
        .lines()
        .filter(|line| line.starts_with("rsproof_http_requests_total{"))
        .find(|line| wanted.iter().all(|label| line.contains(label.as_str())))
        .and_then(|line| line.rsplit(' ').next())
        .and_then(|value| value.parse().ok())
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_request_passes_through_all_layers() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let app = test_app_with_middleware();

    let response = app.oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

// The current-thread runtime keeps every poll on the thread that owns the
// local recorder.
#[tokio::test]
async fn test_metrics_are_collected() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    let _guard = ::metrics::set_default_local_recorder(&recorder);
    let app = test_app_with_middleware();

    for _ in 0..2 {
        let response = app.clone().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = app.clone().oneshot(get_request("/unavailable")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let response = app.oneshot(get_request("/nowhere")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let output = handle.render();
    assert_eq!(request_count(&output, "GET", "/", "2xx"), Some(2));
    assert_eq!(request_count(&output, "GET", "/unavailable", "5xx"), Some(1));
    assert_eq!(request_count(&output, "GET", "unmatched", "4xx"), Some(1));
    assert!(output.contains("rsproof_http_request_duration_seconds"));
}

#[tokio::test]
async fn test_cors_headers_are_set() {
    let app = Router::new()
        .route("/check", axum::routing::post(|| async { "OK" }))
        .layer(cors_layer());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/check")
                .header("Origin", "https://editor.example.com")
                .header("Access-Control-Request-Method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/check")
                .header("Origin", "https://editor.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let app = Router::new()
        .route(
            "/",
            get(|req: ExtractRequest| async move {
                RequestId::from_request(&req)
                    .unwrap_or("missing")
                    .to_string()
            }),
        )
        .layer(RequestIdLayer::new());

    // Without an id a UUID is generated
    let response = app.clone().oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .expect("response should carry x-request-id")
        .to_str()
        .unwrap()
        .to_string();
    assert!(uuid::Uuid::parse_str(&response_id).is_ok());

    // The handler saw the same id through the extension
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    assert_eq!(std::str::from_utf8(&body).unwrap(), response_id);

    // A client-supplied id is kept
    let custom_id = "editor-session-42";
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, custom_id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap(),
        custom_id
    );
}

#[tokio::test]
async fn test_oversized_client_request_id_is_replaced() {
    let app = Router::new()
        .route("/", get(|| async { "OK" }))
        .layer(RequestIdLayer::new());
    let long_id = "x".repeat(500);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, long_id.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .unwrap()
        .to_str()
        .unwrap();
    assert_ne!(id, long_id);
    assert!(uuid::Uuid::parse_str(id).is_ok());
}
