//! HTTP front-end gateway: auth, validation, and ring ingress adapters.
//!
//! Sits in front of the three `xgw_ring` transports, translating HTTP
//! requests from trading clients into the wire records the matching engine
//! consumes on the other side of the ring files.

pub mod adapters;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod metrics;
pub mod rings;
pub mod state;

pub use config::GatewayConfig;
pub use error::AppError;
pub use state::AppState;

/// Builds the axum `Router` for the given state. Split out from `main` so
/// integration tests can exercise the full HTTP surface without a real
/// network listener.
pub fn app(state: AppState) -> axum::Router {
    http::routes::router(state)
}
