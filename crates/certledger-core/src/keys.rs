//! Key namespace for the shared world-state keyspace.
//!
//! Certificates and transactions live side by side in one flat keyspace.
//! Certificate keys are the bare certificate id; transaction keys carry the
//! [`TRANSACTION_PREFIX`]. All key construction and classification goes
//! through [`RecordKey`] so a new record kind only has to be added here.
//!
//! Certificate ids come from the invocation id source and never start with a
//! record prefix; a raw key is classified by prefix alone.

use std::fmt;

use crate::ids::{CertificateId, TransactionId};

/// Prefix of every transaction key.
pub const TRANSACTION_PREFIX: &str = "TRANSACTION_";

/// The kinds of record stored in the keyspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// An [`EnergyCertificate`](crate::EnergyCertificate).
    Certificate,
    /// A [`Transaction`](crate::Transaction) audit record.
    Transaction,
}

impl RecordKind {
    /// Human-readable name used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Certificate => "certificate",
            Self::Transaction => "transaction",
        }
    }

    /// Key prefix owned by this kind (empty for certificates).
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Certificate => "",
            Self::Transaction => TRANSACTION_PREFIX,
        }
    }

    /// Classify a raw stored key.
    #[must_use]
    pub fn of_key(raw: &str) -> Self {
        if raw.starts_with(TRANSACTION_PREFIX) {
            Self::Transaction
        } else {
            Self::Certificate
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed key into the world state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// Key of a certificate record.
    Certificate(CertificateId),
    /// Key of a transaction record.
    Transaction(TransactionId),
}

impl RecordKey {
    /// The kind of record addressed by this key.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Certificate(_) => RecordKind::Certificate,
            Self::Transaction(_) => RecordKind::Transaction,
        }
    }

    /// The storage key string.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Certificate(id) => id.as_str().to_owned(),
            Self::Transaction(id) => format!("{TRANSACTION_PREFIX}{id}"),
        }
    }

    /// Parse a raw storage key back into its typed form.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(TRANSACTION_PREFIX) {
            Some(id) => Self::Transaction(TransactionId::new(id)),
            None => Self::Certificate(CertificateId::new(raw)),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Certificate(id) => f.write_str(id.as_str()),
            Self::Transaction(id) => write!(f, "{TRANSACTION_PREFIX}{id}"),
        }
    }
}

impl From<CertificateId> for RecordKey {
    fn from(id: CertificateId) -> Self {
        Self::Certificate(id)
    }
}

impl From<TransactionId> for RecordKey {
    fn from(id: TransactionId) -> Self {
        Self::Transaction(id)
    }
}
