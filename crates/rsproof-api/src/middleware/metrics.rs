//! Metrics collection middleware.
//!
//! Records every request through the `metrics` facade, exported to
//! Prometheus by `metrics-exporter-prometheus`.
//!
//! # Metrics Emitted
//!
//! - `rsproof_http_requests_total` - Counter with labels: method, path, status_class
//! - `rsproof_http_request_duration_seconds` - Histogram with labels: method, path, status_class

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::{Duration, Instant},
};

use axum::{
    extract::MatchedPath,
    http::{Request, Response, StatusCode},
};
use tower::{Layer, Service};

/// Coarse status grouping used as a metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    ClientError,
    ServerError,
    Other,
}

impl StatusClass {
    pub fn of(status: StatusCode) -> Self {
        if status.is_success() {
            StatusClass::Success
        } else if status.is_client_error() {
            StatusClass::ClientError
        } else if status.is_server_error() {
            StatusClass::ServerError
        } else {
            StatusClass::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusClass::Success => "2xx",
            StatusClass::ClientError => "4xx",
            StatusClass::ServerError => "5xx",
            StatusClass::Other => "other",
        }
    }
}

/// Records one finished request through the `metrics` facade.
pub fn record_request(method: &str, path: &str, status: StatusCode, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status_class", StatusClass::of(status).as_str().to_string()),
    ];

    metrics::counter!("rsproof_http_requests_total", &labels).increment(1);
    metrics::histogram!("rsproof_http_request_duration_seconds", &labels)
        .record(duration.as_secs_f64());
}

/// Layer that collects request metrics.
#[derive(Clone, Default)]
pub struct MetricsLayer;

impl MetricsLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService { inner }
    }
}

/// Service that records metrics for each request.
#[derive(Clone)]
pub struct MetricsService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for MetricsService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
    ResBody: Default + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let method = request.method().to_string();
        // Route pattern keeps label cardinality bounded; unmatched paths are grouped
        let path = request
            .extensions()
            .get::<MatchedPath>()
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| "unmatched".to_string());
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let response = inner.call(request).await?;
            record_request(&method, &path, response.status(), start.elapsed());
            Ok(response)
        })
    }
}
