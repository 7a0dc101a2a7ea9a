//! HTTP gateway for the energy certificate ledger.
//!
//! Each request runs one contract invocation against the configured world
//! state:
//!
//! - writes (`POST`, `PUT`, `DELETE`) are submitted and commit atomically
//! - reads are evaluated against committed state
//!
//! Contract errors map onto HTTP statuses in [`ApiError`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Contract calls are synchronous

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{ServiceConfig, StoreBackend};
pub use error::ApiError;
pub use routes::create_router;
pub use state::{open_store, AppState};
