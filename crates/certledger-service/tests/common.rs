//! Common test utilities for certledger-service integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use certledger_contract::UpdateMode;
use certledger_core::{FixedClock, SequentialIds};
use certledger_service::{create_router, AppState, ServiceConfig, StoreBackend};
use certledger_store::MemoryStore;

/// Timestamp every invocation in these tests sees.
pub const FIXED_DATE: &str = "2024-05-01T12:00:00Z";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
}

impl TestHarness {
    /// Create a harness over an empty in-memory ledger in legacy update mode.
    pub fn new() -> Self {
        Self::with_update_mode(UpdateMode::Legacy)
    }

    /// Create a harness with the given update behaviour.
    pub fn with_update_mode(update_mode: UpdateMode) -> Self {
        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: String::new(),
            store_backend: StoreBackend::Memory,
            update_mode,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        let state = AppState::new(Arc::new(MemoryStore::new()), config)
            .with_providers(Arc::new(SequentialIds::new("tx-")), Arc::new(clock));
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server }
    }

    /// Issue a certificate and return its id.
    pub async fn issue(&self, owner: &str, producer: &str) -> String {
        let response = self
            .server
            .post("/v1/certificates")
            .json(&certificate_body(owner, producer))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let body: Value = response.json();
        body["id"].as_str().expect("issued id").to_string()
    }

    /// Transfer a certificate and return the receipt.
    pub async fn transfer(&self, id: &str, to: &str, price: f64) -> Value {
        let response = self
            .server
            .post(&format!("/v1/certificates/{id}/transfer"))
            .json(&json!({ "new_owner_id": to, "price": price }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Request body for a certificate with fixed emission data.
pub fn certificate_body(owner: &str, producer: &str) -> Value {
    json!({
        "owner_id": owner,
        "producer_id": producer,
        "emission_date": "2024-01-15",
        "usable_month": 2,
        "usable_year": 2024,
        "regulatory_authority_id": "reg-1"
    })
}
