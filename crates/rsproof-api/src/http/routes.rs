//! HTTP route definitions and handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    async_trait,
    error_handling::HandleErrorLayer,
    extract::{DefaultBodyLimit, FromRequest, Request, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    BoxError, Json, Router,
};
use serde::{Deserialize, Serialize};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, warn};

use rsproof_domain::{CheckResult, DomainError, GrammarEngine};
use rsproof_server::config::ServerSettings;
use rsproof_server::CheckHandlerError;

use super::state::AppState;
use crate::middleware::{
    cors_layer, MetricsLayer, RequestIdLayer, RequestLoggingLayer, TracingLayer,
};
use crate::observability::{
    metrics_handler, record_check_request, CheckKind, CheckOutcome, MetricsState,
};

/// Custom JSON extractor that returns 400 Bad Request instead of 422 Unprocessable Entity
/// for deserialization errors.
///
/// Preserves 413 Payload Too Large for body limit errors.
pub struct JsonBadRequest<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBadRequest<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBadRequest(value)),
            Err(rejection) => {
                use axum::extract::rejection::JsonRejection;

                let too_large = matches!(rejection, JsonRejection::BytesRejection(_))
                    && rejection.status() == StatusCode::PAYLOAD_TOO_LARGE;

                let message = rejection.body_text();
                if too_large {
                    Err(ApiError::payload_too_large(message))
                } else {
                    Err(ApiError::validation_error(message))
                }
            }
        }
    }
}

/// Default request body size limit (2MB).
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Default time a request may take before it is answered with 504.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Router-level settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpOptions {
    /// Maximum request body size in bytes
    pub body_limit: usize,
    /// Deadline for a whole request, engine time included
    pub request_timeout: Duration,
    /// Attach a permissive CORS layer
    pub cors: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            body_limit: DEFAULT_BODY_LIMIT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cors: false,
        }
    }
}

impl From<&ServerSettings> for HttpOptions {
    fn from(settings: &ServerSettings) -> Self {
        Self {
            body_limit: settings.body_limit_bytes,
            request_timeout: settings.request_timeout(),
            cors: settings.cors,
        }
    }
}

/// Routes that need the check state.
fn api_routes<E: GrammarEngine + 'static>() -> Router<Arc<AppState<E>>> {
    Router::new()
        .route("/check", post(check::<E>))
        .route("/bulk-check", post(bulk_check::<E>))
        .route("/ready", get(readiness_check::<E>))
}

/// Creates the HTTP router with default options and no `/metrics` endpoint.
pub fn create_router<E: GrammarEngine + 'static>(state: AppState<E>) -> Router {
    create_router_with_options(state, HttpOptions::default())
}

/// Creates the HTTP router without the `/metrics` endpoint.
pub fn create_router_with_options<E: GrammarEngine + 'static>(
    state: AppState<E>,
    options: HttpOptions,
) -> Router {
    let router = api_routes::<E>()
        .with_state(Arc::new(state))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(options.body_limit))
        .route("/health", get(health_check));

    with_middleware(router, options)
}

/// Creates the HTTP router with observability endpoints.
///
/// This includes the check endpoints plus:
/// - `/metrics` - Prometheus metrics endpoint
/// - `/health` - Basic health check
/// - `/ready` - Readiness check (probes the engine)
///
/// # Arguments
///
/// * `state` - Application state with the check handler
/// * `metrics_state` - Metrics state for Prometheus endpoint
/// * `options` - Body limit, request timeout and CORS settings
pub fn create_router_with_observability<E: GrammarEngine + 'static>(
    state: AppState<E>,
    metrics_state: MetricsState,
    options: HttpOptions,
) -> Router {
    // Body limit applies to the API routes only
    let api_router = api_routes::<E>()
        .with_state(Arc::new(state))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(options.body_limit));

    let observability_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_check))
        .with_state(metrics_state);

    with_middleware(api_router.merge(observability_router), options)
}

/// Wraps the routes with the request timeout, optional CORS and the
/// request id / metrics / tracing / logging stack (outermost last).
fn with_middleware(router: Router, options: HttpOptions) -> Router {
    let router = router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(options.request_timeout)),
    );

    let router = if options.cors {
        router.layer(cors_layer())
    } else {
        router
    };

    router
        .layer(RequestLoggingLayer::new())
        .layer(TracingLayer::new())
        .layer(MetricsLayer::new())
        .layer(RequestIdLayer::new())
}

async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("request exceeded the configured timeout");
        ApiError::gateway_timeout("request timed out")
    } else {
        error!(error = %err, "unhandled middleware error");
        ApiError::internal_error("internal error")
    }
}

// ============================================================
// Error Handling
// ============================================================

/// Error codes carried in [`ApiError::code`].
///
/// Each code maps to one HTTP status via [`ApiError::into_response`].
pub mod error_codes {
    // 400 Bad Request
    /// Malformed body or a request outside the gateway limits.
    pub const VALIDATION_ERROR: &str = "validation_error";

    // 413 Payload Too Large
    /// Request body exceeds the configured size limit.
    pub const PAYLOAD_TOO_LARGE: &str = "payload_too_large";

    // 422 Unprocessable Entity
    /// The grammar engine refused the submitted text.
    pub const TEXT_REJECTED: &str = "text_rejected";

    // 5xx codes
    /// Unexpected internal error, including engine result drift.
    pub const INTERNAL_ERROR: &str = "internal_error";
    /// The engine or the request as a whole ran out of time.
    pub const TIMEOUT: &str = "timeout";
    /// The grammar engine cannot serve requests.
    pub const SERVICE_UNAVAILABLE: &str = "service_unavailable";
}

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a validation error (400).
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(error_codes::VALIDATION_ERROR, message)
    }

    /// Creates a payload too large error (413).
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(error_codes::PAYLOAD_TOO_LARGE, message)
    }

    /// Creates a text rejected error (422).
    pub fn text_rejected(message: impl Into<String>) -> Self {
        Self::new(error_codes::TEXT_REJECTED, message)
    }

    /// Creates an internal error (500).
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(error_codes::INTERNAL_ERROR, message)
    }

    /// Creates a timeout error (504 Gateway Timeout).
    pub fn gateway_timeout(message: impl Into<String>) -> Self {
        Self::new(error_codes::TIMEOUT, message)
    }

    /// Creates a service unavailable error (503 Service Unavailable).
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(error_codes::SERVICE_UNAVAILABLE, message)
    }

    /// HTTP status for this error's code.
    pub fn status(&self) -> StatusCode {
        use error_codes::*;

        match self.code.as_str() {
            VALIDATION_ERROR => StatusCode::BAD_REQUEST,
            PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            TEXT_REJECTED => StatusCode::UNPROCESSABLE_ENTITY,
            TIMEOUT => StatusCode::GATEWAY_TIMEOUT,
            SERVICE_UNAVAILABLE => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        // Details go to the log, clients get a fixed message
        match &err {
            DomainError::EngineUnavailable { .. } => {
                error!(error = %err, "grammar engine unavailable");
                ApiError::service_unavailable("grammar engine unavailable")
            }
            DomainError::TextRejected { .. } => {
                warn!(error = %err, "grammar engine rejected the text");
                ApiError::text_rejected("grammar engine rejected the text")
            }
            DomainError::EngineTimeout { .. } => {
                error!(error = %err, "grammar engine timeout");
                ApiError::gateway_timeout("grammar engine timed out")
            }
            DomainError::Mapping(_) => {
                error!(error = %err, "engine result could not be mapped");
                ApiError::internal_error("internal error during text check")
            }
        }
    }
}

impl From<CheckHandlerError> for ApiError {
    fn from(err: CheckHandlerError) -> Self {
        match err {
            CheckHandlerError::TooManyTexts { .. } | CheckHandlerError::TextTooLong { .. } => {
                ApiError::validation_error(err.to_string())
            }
            CheckHandlerError::Domain(domain) => domain.into(),
        }
    }
}

fn outcome_of(err: &CheckHandlerError) -> CheckOutcome {
    match err {
        CheckHandlerError::TooManyTexts { .. }
        | CheckHandlerError::TextTooLong { .. }
        | CheckHandlerError::Domain(DomainError::TextRejected { .. }) => CheckOutcome::Rejected,
        CheckHandlerError::Domain(DomainError::EngineUnavailable { .. }) => {
            CheckOutcome::EngineUnavailable
        }
        CheckHandlerError::Domain(DomainError::EngineTimeout { .. }) => CheckOutcome::Timeout,
        CheckHandlerError::Domain(DomainError::Mapping(_)) => CheckOutcome::MappingError,
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ============================================================
// Health and Readiness Checks
// ============================================================

/// Basic health check - returns 200 if the server is running.
///
/// This is a liveness probe. It does NOT check the engine.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Readiness check - returns 200 when the grammar engine answers its health
/// probe and 503 otherwise.
///
/// Error details are logged but not exposed in the response.
async fn readiness_check<E: GrammarEngine + 'static>(
    State(state): State<Arc<AppState<E>>>,
) -> impl IntoResponse {
    match state.handler.engine_health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ready",
                "checks": {
                    "engine": "ok"
                }
            })),
        ),
        Err(e) => {
            error!("Readiness check failed: engine unavailable: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "not_ready",
                    "checks": {
                        "engine": "unavailable"
                    }
                })),
            )
        }
    }
}

// ============================================================
// Check Operations
// ============================================================

/// Request body for a single check.
#[derive(Debug, Deserialize, Serialize)]
pub struct CheckRequest {
    pub text: String,
}

/// Request body for a bulk check.
#[derive(Debug, Deserialize, Serialize)]
pub struct BulkCheckRequest {
    pub texts: Vec<String>,
}

async fn check<E: GrammarEngine + 'static>(
    State(state): State<Arc<AppState<E>>>,
    JsonBadRequest(body): JsonBadRequest<CheckRequest>,
) -> ApiResult<Json<CheckResult>> {
    let started = Instant::now();
    let result = state.handler.check(&body.text).await;
    let elapsed = started.elapsed().as_secs_f64();

    match result {
        Ok(result) => {
            record_check_request(
                CheckKind::Single,
                CheckOutcome::Ok,
                elapsed,
                1,
                result.matches.len(),
            );
            Ok(Json(result))
        }
        Err(err) => {
            record_check_request(CheckKind::Single, outcome_of(&err), elapsed, 1, 0);
            Err(err.into())
        }
    }
}

/// Bulk check. Either every text succeeds or the whole request fails;
/// partial lists are never returned.
async fn bulk_check<E: GrammarEngine + 'static>(
    State(state): State<Arc<AppState<E>>>,
    JsonBadRequest(body): JsonBadRequest<BulkCheckRequest>,
) -> ApiResult<Json<Vec<CheckResult>>> {
    let started = Instant::now();
    let result = state.handler.bulk_check(&body.texts).await;
    let elapsed = started.elapsed().as_secs_f64();
    let texts = body.texts.len();

    match result {
        Ok(results) => {
            let matches = results.iter().map(|r| r.matches.len()).sum();
            record_check_request(CheckKind::Bulk, CheckOutcome::Ok, elapsed, texts, matches);
            Ok(Json(results))
        }
        Err(err) => {
            record_check_request(CheckKind::Bulk, outcome_of(&err), elapsed, texts, 0);
            Err(err.into())
        }
    }
}
