//! JSON record codec.
//!
//! Records are stored as flat JSON objects with fixed camelCase field names so
//! that selector queries can address them. Decoding is strict: unknown fields,
//! missing fields and type mismatches all fail with [`CodecError::Decode`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CodecError, Result};
use crate::keys::{RecordKey, RecordKind};

/// A value that lives under a typed key in the world state.
pub trait Record: Serialize + DeserializeOwned {
    /// The key namespace this record belongs to.
    const KIND: RecordKind;

    /// The key this record is stored under.
    fn key(&self) -> RecordKey;

    /// Serialize to stored bytes.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Encode` if the value cannot be represented.
    fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CodecError::Encode(e.to_string()))
    }

    /// Deserialize from stored bytes.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Decode` if the bytes are not this record's shape.
    fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}
