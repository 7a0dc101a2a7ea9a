//! Error types for record encoding.

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors raised while turning records into stored bytes and back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The record could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),

    /// The stored bytes do not have the shape of the expected record.
    #[error("decode error: {0}")]
    Decode(String),
}
