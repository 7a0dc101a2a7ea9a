//! Liveness endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the process answers.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Configured world-state backend.
    pub store_backend: String,
    /// Configured certificate update behaviour.
    pub update_mode: String,
}

/// Report liveness and the active ledger configuration.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store_backend: state.config.store_backend.to_string(),
        update_mode: state.contract.certificates().update_mode().to_string(),
    })
}
