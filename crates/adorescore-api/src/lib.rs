//! Adorescore API
//!
//! HTTP service in front of the review analysis pipeline:
//! - `POST /analyze` runs a review through every model
//! - `GET /health` liveness, `GET /ready` per-model readiness
//! - `GET /metrics` Prometheus metrics

pub mod config;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use routes::{create_router, AppError};
pub use state::AppState;
