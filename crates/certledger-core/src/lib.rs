//! Core types for the energy certificate ledger.
//!
//! This crate provides the foundational types shared by the store, contract
//! and service crates:
//!
//! - **Identifiers**: `CertificateId`, `TransactionId`, `UserId`, `ProducerId`, `AuthorityId`
//! - **Records**: `EnergyCertificate`, `Transaction` and the `Record` codec trait
//! - **Keys**: `RecordKey`, `RecordKind` for the shared keyspace
//! - **Queries**: `Selector` equality expressions
//! - **Providers**: `IdProvider` and `Clock` capabilities handed to each invocation

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod certificate;
pub mod codec;
pub mod error;
pub mod ids;
pub mod keys;
pub mod provider;
pub mod selector;
pub mod transaction;

pub use certificate::{EnergyCertificate, NewCertificate};
pub use codec::Record;
pub use error::{CodecError, Result};
pub use ids::{AuthorityId, CertificateId, ProducerId, TransactionId, UserId};
pub use keys::{RecordKey, RecordKind, TRANSACTION_PREFIX};
pub use provider::{format_timestamp, Clock, FixedClock, IdProvider, SequentialIds, SystemClock, UuidIds};
pub use selector::Selector;
pub use transaction::Transaction;
