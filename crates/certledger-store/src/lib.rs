//! World-state storage for the energy certificate ledger.
//!
//! This crate defines the narrow adapter the ledger talks to, [`RecordStore`],
//! plus the per-invocation [`TxContext`] that stages writes and commits them
//! as one batch.
//!
//! # Backends
//!
//! - [`MemoryStore`]: an in-process ordered map, used by tests and ephemeral nodes
//! - `RocksStore`: `RocksDB` with a single `world_state` column family
//!   (feature `rocksdb-backend`, on by default)
//!
//! # Example
//!
//! ```
//! use certledger_core::{SequentialIds, SystemClock};
//! use certledger_store::{MemoryStore, RecordStore, TxContext};
//!
//! let store = MemoryStore::new();
//! let mut ctx = TxContext::begin(&store, &SequentialIds::new("tx-"), &SystemClock);
//! ctx.put_state("cert-1", b"{}".to_vec()).unwrap();
//! ctx.commit().unwrap();
//!
//! assert!(store.get("cert-1").unwrap().is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod context;
pub mod error;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
pub mod schema;

pub use context::TxContext;
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use certledger_core::Selector;

/// One write in a commit batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Store `value` under `key`, replacing any previous value.
    Put {
        /// Storage key.
        key: String,
        /// Encoded record.
        value: Vec<u8>,
    },
    /// Remove `key`. Deleting an absent key is not an error.
    Delete {
        /// Storage key.
        key: String,
    },
}

/// The key-value ledger the contract runs against.
///
/// `get`, `put` and `delete` are individually atomic. [`RecordStore::write`]
/// applies a whole batch atomically: every op is visible to later reads or
/// none is. Queries are answered from committed state and fully collected
/// before returning.
pub trait RecordStore: Send + Sync {
    /// Read the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.write(vec![WriteOp::Put {
            key: key.to_owned(),
            value: value.to_vec(),
        }])
    }

    /// Remove `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn delete(&self, key: &str) -> Result<()> {
        self.write(vec![WriteOp::Delete {
            key: key.to_owned(),
        }])
    }

    /// All `(key, value)` pairs matching `selector`, in backend order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails mid-scan.
    fn query(&self, selector: &Selector) -> Result<Vec<(String, Vec<u8>)>>;

    /// Apply `batch` atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch could not be applied; nothing is applied then.
    fn write(&self, batch: Vec<WriteOp>) -> Result<()>;
}
