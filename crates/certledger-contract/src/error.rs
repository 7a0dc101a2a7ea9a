//! Error types for contract operations.

use certledger_core::{CodecError, RecordKind};
use certledger_store::StoreError;

/// Result type for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;

/// Errors returned by contract operations.
///
/// Nothing is recovered locally: every failure names the record it concerns
/// and goes back to the caller with its kind intact.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// The targeted record does not exist.
    #[error("{entity} {id} does not exist")]
    NotFound {
        /// Kind of record.
        entity: RecordKind,
        /// Id or key that was looked up.
        id: String,
    },

    /// Stored bytes do not have the shape of the expected record.
    #[error("could not decode {entity} {id}: {message}")]
    Decode {
        /// Kind of record.
        entity: RecordKind,
        /// Key the bytes were stored under.
        id: String,
        /// Decoder message.
        message: String,
    },

    /// A record could not be encoded for storage.
    #[error("could not encode {entity} {id}: {message}")]
    Encode {
        /// Kind of record.
        entity: RecordKind,
        /// Key the record was meant for.
        id: String,
        /// Encoder message.
        message: String,
    },

    /// The world-state adapter failed.
    #[error("store failure during {operation} of {key}: {source}")]
    Store {
        /// Operation in progress.
        operation: &'static str,
        /// Key or query being processed.
        key: String,
        /// Adapter error.
        #[source]
        source: StoreError,
    },

    /// Input rejected before touching the store. No operation raises this yet.
    #[error("invalid input: {0}")]
    Validation(String),
}

impl ContractError {
    pub(crate) fn not_found(entity: RecordKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub(crate) fn store(operation: &'static str, key: impl Into<String>, source: StoreError) -> Self {
        Self::Store {
            operation,
            key: key.into(),
            source,
        }
    }

    pub(crate) fn codec(entity: RecordKind, id: impl Into<String>, err: CodecError) -> Self {
        match err {
            CodecError::Decode(message) => Self::Decode {
                entity,
                id: id.into(),
                message,
            },
            CodecError::Encode(message) => Self::Encode {
                entity,
                id: id.into(),
                message,
            },
        }
    }

    /// Whether this is a [`ContractError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this is a [`ContractError::Decode`].
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
