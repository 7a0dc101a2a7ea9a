//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// The shared world state: certificates under their bare id, transactions
    /// under `TRANSACTION_<id>`.
    pub const WORLD_STATE: &str = "world_state";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::WORLD_STATE]
}
