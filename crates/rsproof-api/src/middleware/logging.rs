//! Request logging middleware.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use axum::http::{Request, Response};
use tower::{Layer, Service};
use tracing::{info, warn};

use super::request_id::RequestId;

/// Layer that logs HTTP requests and responses.
#[derive(Clone, Default)]
pub struct RequestLoggingLayer;

impl RequestLoggingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestLoggingLayer {
    type Service = RequestLoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLoggingService { inner }
    }
}

/// Service that logs request/response details.
#[derive(Clone)]
pub struct RequestLoggingService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestLoggingService<S>
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
        let method = request.method().clone();
        let uri = request.uri().clone();
        let request_id = RequestId::from_request(&request)
            .unwrap_or_default()
            .to_string();

        info!(
            target: "rsproof::http",
            request_id = %request_id,
            method = %method,
            uri = %uri,
            "request started"
        );

        let start = Instant::now();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let response = inner.call(request).await?;
            let status = response.status();
            let duration_ms = start.elapsed().as_millis() as u64;

            // Engine outages and timeouts surface as 5xx
            if status.is_server_error() {
                warn!(
                    target: "rsproof::http",
                    request_id = %request_id,
                    method = %method,
                    uri = %uri,
                    status = status.as_u16(),
                    duration_ms,
                    "request failed"
                );
            } else {
                info!(
                    target: "rsproof::http",
                    request_id = %request_id,
                    method = %method,
                    uri = %uri,
                    status = status.as_u16(),
                    duration_ms,
                    "request completed"
                );
            }

            Ok(response)
        })
    }
}
