//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post, put};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{certificates, health, transactions};
use crate::state::AppState;

/// Maximum concurrent requests for invocations that commit.
const SUBMIT_MAX_CONCURRENT_REQUESTS: usize = 32;

/// Maximum concurrent requests for all `/v1` endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 128;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Certificates
/// - `POST /v1/certificates` - Issue a certificate
/// - `GET /v1/certificates?owner=|producer=` - Find certificates
/// - `GET /v1/certificates/:id` - Read a certificate
/// - `PUT /v1/certificates/:id` - Update the usable period
/// - `DELETE /v1/certificates/:id` - Delete a certificate
/// - `GET /v1/certificates/:id/exists` - Check existence
/// - `POST /v1/certificates/:id/transfer` - Transfer to a new owner
///
/// ## Transactions
/// - `GET /v1/transactions?from=|to=|certificate=` - Find transfers
/// - `GET /v1/transactions/:key` - Read a transfer by its full key
pub fn create_router(state: AppState) -> Router {
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    // Committing invocations get a tighter limit.
    let submit_routes = Router::new()
        .route("/", post(certificates::create_certificate))
        .route(
            "/:id",
            put(certificates::update_certificate)
                .delete(certificates::delete_certificate),
        )
        .route("/:id/transfer", post(certificates::transfer_certificate))
        .layer(ConcurrencyLimitLayer::new(SUBMIT_MAX_CONCURRENT_REQUESTS));

    let certificate_routes = Router::new()
        .route("/", get(certificates::list_certificates))
        .route("/:id", get(certificates::get_certificate))
        .route("/:id/exists", get(certificates::certificate_exists))
        .merge(submit_routes);

    let api_routes = Router::new()
        .nest("/certificates", certificate_routes)
        .route("/transactions", get(transactions::list_transactions))
        .route("/transactions/:key", get(transactions::get_transaction))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        .route("/health", get(health::health))
        .nest("/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
