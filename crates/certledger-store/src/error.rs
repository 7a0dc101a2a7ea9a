//! Error types for world-state storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by a world-state backend.
///
/// The ledger treats these as opaque: they are wrapped with operation context
/// and handed back to the caller without retry.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// A stored key is not valid UTF-8 and cannot be addressed.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}
