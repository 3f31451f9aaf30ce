//! Prometheus metrics infrastructure.
//!
//! Uses the `metrics` facade with `metrics-exporter-prometheus` for exposition.
//!
//! # Metrics Exposed
//!
//! - `rsproof_http_requests_total` - Total HTTP requests by method, path, status class
//! - `rsproof_http_request_duration_seconds` - Request duration histogram
//! - `rsproof_check_requests_total` - Check requests by kind and outcome
//! - `rsproof_check_duration_seconds` - Check duration histogram by kind
//! - `rsproof_check_texts_total` - Texts checked, by kind
//! - `rsproof_check_matches_total` - Matches returned, by kind

use std::sync::Arc;

use axum::{extract::State, http::header::CONTENT_TYPE, response::IntoResponse};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Shared state containing the Prometheus handle for metrics rendering.
#[derive(Clone)]
pub struct MetricsState {
    handle: Arc<PrometheusHandle>,
}

impl MetricsState {
    /// Creates a new metrics state with the given Prometheus handle.
    pub fn new(handle: PrometheusHandle) -> Self {
        Self {
            handle: Arc::new(handle),
        }
    }

    /// Renders the current metrics in Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Error type for metrics initialization.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("failed to install Prometheus recorder: recorder already installed")]
    AlreadyInstalled,
}

/// Installs the global Prometheus recorder.
///
/// Must be called once at startup before any metrics are recorded.
///
/// # Errors
///
/// Returns an error if a recorder is already installed.
pub fn init_metrics() -> Result<MetricsState, MetricsError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|_| MetricsError::AlreadyInstalled)?;

    register_default_metrics();

    Ok(MetricsState::new(handle))
}

fn register_default_metrics() {
    metrics::describe_counter!(
        "rsproof_http_requests_total",
        "Total number of HTTP requests"
    );
    metrics::describe_histogram!(
        "rsproof_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );

    metrics::describe_counter!(
        "rsproof_check_requests_total",
        "Total number of check requests by kind and outcome"
    );
    metrics::describe_histogram!(
        "rsproof_check_duration_seconds",
        "Check duration in seconds, engine time included"
    );
    metrics::describe_counter!("rsproof_check_texts_total", "Total number of texts checked");
    metrics::describe_counter!(
        "rsproof_check_matches_total",
        "Total number of matches returned to clients"
    );
}

/// Prometheus exposition format content type.
const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Handler for the `/metrics` endpoint.
pub async fn metrics_handler(State(state): State<MetricsState>) -> impl IntoResponse {
    ([(CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], state.render())
}

/// Which endpoint a check came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Single,
    Bulk,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Single => "single",
            CheckKind::Bulk => "bulk",
        }
    }
}

/// How a check request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Ok,
    Rejected,
    EngineUnavailable,
    Timeout,
    MappingError,
}

impl CheckOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckOutcome::Ok => "ok",
            CheckOutcome::Rejected => "rejected",
            CheckOutcome::EngineUnavailable => "engine_unavailable",
            CheckOutcome::Timeout => "timeout",
            CheckOutcome::MappingError => "mapping_error",
        }
    }
}

/// Records one check request.
///
/// `texts` and `matches` only count toward the totals on success.
pub fn record_check_request(
    kind: CheckKind,
    outcome: CheckOutcome,
    duration_seconds: f64,
    texts: usize,
    matches: usize,
) {
    let labels = [
        ("kind", kind.as_str().to_string()),
        ("outcome", outcome.as_str().to_string()),
    ];

    metrics::counter!("rsproof_check_requests_total", &labels).increment(1);
    metrics::histogram!("rsproof_check_duration_seconds", "kind" => kind.as_str())
        .record(duration_seconds);

    if outcome == CheckOutcome::Ok {
        metrics::counter!("rsproof_check_texts_total", "kind" => kind.as_str())
            .increment(texts as u64);
        metrics::counter!("rsproof_check_matches_total", "kind" => kind.as_str())
            .increment(matches as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Only one recorder can be installed per process; these tests use
    // local recorders. The /metrics endpoint is covered in the http tests.

    #[test]
    fn test_metrics_state_can_be_cloned() {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let state = MetricsState::new(handle);
        let _cloned = state.clone();
    }

    #[test]
    fn test_check_metrics_are_rendered() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let state = MetricsState::new(recorder.handle());

        metrics::with_local_recorder(&recorder, || {
            record_check_request(CheckKind::Bulk, CheckOutcome::Ok, 0.02, 3, 2);
            record_check_request(CheckKind::Single, CheckOutcome::Timeout, 1.5, 1, 0);
        });

        let output = state.render();
        assert!(output.contains("rsproof_check_requests_total"));
        assert!(output.contains(r#"outcome="timeout""#));
        assert!(output.contains(r#"rsproof_check_texts_total{kind="bulk"} 3"#));
        assert!(output.contains(r#"rsproof_check_matches_total{kind="bulk"} 2"#));
        assert!(!output.contains(r#"rsproof_check_texts_total{kind="single"}"#));
    }

    #[test]
    fn test_label_spellings() {
        assert_eq!(CheckKind::Single.as_str(), "single");
        assert_eq!(CheckKind::Bulk.as_str(), "bulk");
        assert_eq!(CheckOutcome::EngineUnavailable.as_str(), "engine_unavailable");
        assert_eq!(CheckOutcome::MappingError.as_str(), "mapping_error");
        assert_eq!(CheckOutcome::Rejected.as_str(), "rejected");
    }
}
