//! Application state.

use std::sync::Arc;

use certledger_contract::{EnergyCertificateContract, Result};
use certledger_core::{Clock, IdProvider, SystemClock, UuidIds};
use certledger_store::{MemoryStore, RecordStore, StoreError, TxContext};

use crate::config::{ServiceConfig, StoreBackend};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The world-state backend.
    pub store: Arc<dyn RecordStore>,

    /// Source of invocation ids.
    pub ids: Arc<dyn IdProvider>,

    /// Source of invocation timestamps.
    pub clock: Arc<dyn Clock>,

    /// The contract every request is dispatched to.
    pub contract: EnergyCertificateContract,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create application state with random ids and the system clock.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, config: ServiceConfig) -> Self {
        tracing::info!(update_mode = %config.update_mode, "Contract configured");

        Self {
            store,
            ids: Arc::new(UuidIds),
            clock: Arc::new(SystemClock),
            contract: EnergyCertificateContract::new(config.update_mode),
            config,
        }
    }

    /// Replace the id and time sources.
    #[must_use]
    pub fn with_providers(mut self, ids: Arc<dyn IdProvider>, clock: Arc<dyn Clock>) -> Self {
        self.ids = ids;
        self.clock = clock;
        self
    }

    /// Run a committing invocation.
    ///
    /// # Errors
    ///
    /// Returns the contract error; nothing is committed then.
    pub fn submit<T>(
        &self,
        op: impl FnOnce(&EnergyCertificateContract, &mut TxContext<'_>) -> Result<T>,
    ) -> Result<T> {
        self.contract
            .submit(self.store.as_ref(), self.ids.as_ref(), self.clock.as_ref(), op)
    }

    /// Run a read-only invocation.
    ///
    /// # Errors
    ///
    /// Returns the contract error.
    pub fn evaluate<T>(
        &self,
        op: impl FnOnce(&EnergyCertificateContract, &TxContext<'_>) -> Result<T>,
    ) -> Result<T> {
        self.contract
            .evaluate(self.store.as_ref(), self.ids.as_ref(), self.clock.as_ref(), op)
    }
}

/// Open the backend selected in `config`.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, or if `RocksDB` was
/// requested in a build without the `rocksdb-backend` feature.
pub fn open_store(config: &ServiceConfig) -> std::result::Result<Arc<dyn RecordStore>, StoreError> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory world state - records are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "rocksdb-backend")]
        StoreBackend::RocksDb => {
            tracing::info!(path = %config.data_dir, "Opening RocksDB store");
            Ok(Arc::new(certledger_store::RocksStore::open(&config.data_dir)?))
        }
        #[cfg(not(feature = "rocksdb-backend"))]
        StoreBackend::RocksDb => Err(StoreError::Database(
            "rocksdb backend not compiled in; set STORE_BACKEND=memory".into(),
        )),
    }
}
