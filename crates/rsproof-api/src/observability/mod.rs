//! Observability infrastructure for rsproof.
//!
//! This module provides:
//! - Prometheus metrics endpoint and check metrics
//! - Structured logging configuration

mod logging;
mod metrics;

pub use logging::{create_json_layer, init_logging, parse_log_level, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_check_request, CheckKind, CheckOutcome, MetricsError,
    MetricsState,
};
