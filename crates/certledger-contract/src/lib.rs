//! Energy certificate lifecycle and transfer protocol.
//!
//! This crate implements the ledger's business rules on top of a
//! [`RecordStore`](certledger_store::RecordStore):
//!
//! - [`CertificateRepository`]: issue, read, update and delete certificates
//! - [`TransactionLedger`]: append-only transfer audit records
//! - [`TransferProtocol`]: owner change plus audit record as one invocation
//! - [`query`]: selector builders and result decoding for secondary lookups
//! - [`EnergyCertificateContract`]: all of the above behind one facade
//!
//! # Example
//!
//! ```
//! use certledger_contract::{EnergyCertificateContract, UpdateMode};
//! use certledger_core::{AuthorityId, NewCertificate, ProducerId, SequentialIds, SystemClock, UserId};
//! use certledger_store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let ids = SequentialIds::new("tx-");
//! let contract = EnergyCertificateContract::new(UpdateMode::Legacy);
//!
//! let issued = contract
//!     .submit(&store, &ids, &SystemClock, |c, ctx| {
//!         c.create(
//!             ctx,
//!             NewCertificate {
//!                 owner_id: UserId::new("alice"),
//!                 producer_id: ProducerId::new("solar-1"),
//!                 emission_date: "2024-01-15".into(),
//!                 usable_month: 2,
//!                 usable_year: 2024,
//!                 regulatory_authority_id: AuthorityId::new("reg-1"),
//!             },
//!         )
//!     })
//!     .unwrap();
//!
//! contract
//!     .submit(&store, &ids, &SystemClock, |c, ctx| {
//!         c.transfer(ctx, &issued.id, UserId::new("bob"), 12.5)
//!     })
//!     .unwrap();
//!
//! let owner = contract
//!     .evaluate(&store, &ids, &SystemClock, |c, ctx| c.read(ctx, &issued.id))
//!     .unwrap()
//!     .owner_id;
//! assert_eq!(owner, UserId::new("bob"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod error;
pub mod ledger;
pub mod query;
mod records;
pub mod repository;
pub mod transfer;

pub use contract::EnergyCertificateContract;
pub use error::{ContractError, Result};
pub use ledger::TransactionLedger;
pub use repository::{CertificateRepository, Issued, UpdateMode};
pub use transfer::{TransferProtocol, TransferReceipt};
