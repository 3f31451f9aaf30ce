//! HTTP REST API endpoints.
//!
//! # Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/check` | POST | Check a single text |
//! | `/bulk-check` | POST | Check several texts, results in input order |
//! | `/health` | GET | Liveness probe |
//! | `/ready` | GET | Readiness probe (engine health) |
//! | `/metrics` | GET | Prometheus metrics |

pub mod routes;
pub mod state;

pub use routes::{
    create_router, create_router_with_observability, create_router_with_options, error_codes,
    ApiError, BulkCheckRequest, CheckRequest, HttpOptions, DEFAULT_BODY_LIMIT,
    DEFAULT_REQUEST_TIMEOUT,
};
pub use state::AppState;
