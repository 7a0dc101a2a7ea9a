//! Common test utilities for contract integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use certledger_contract::{EnergyCertificateContract, Issued, Result, TransferReceipt};
use certledger_core::{
    AuthorityId, CertificateId, EnergyCertificate, FixedClock, NewCertificate, ProducerId,
    SequentialIds, UserId,
};
use certledger_store::{MemoryStore, RecordStore, TxContext};
use chrono::{TimeZone, Utc};

/// Timestamp every invocation in these tests runs at.
pub const FIXED_DATE: &str = "2024-05-01T12:00:00Z";

/// A contract wired to a store with deterministic ids and time.
pub struct Ledger<S: RecordStore = MemoryStore> {
    /// The backing store.
    pub store: S,
    /// Invocation ids `tx-1`, `tx-2`, ...
    pub ids: SequentialIds,
    /// Frozen at [`FIXED_DATE`].
    pub clock: FixedClock,
    /// Contract under test.
    pub contract: EnergyCertificateContract,
}

impl Ledger<MemoryStore> {
    /// A ledger over an empty in-memory store.
    pub fn memory() -> Self {
        Self::with_store(MemoryStore::new())
    }
}

impl<S: RecordStore> Ledger<S> {
    /// A ledger over `store` with the default contract.
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            ids: SequentialIds::new("tx-"),
            clock: FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
            contract: EnergyCertificateContract::default(),
        }
    }

    /// Swap the contract under test.
    pub fn with_contract(mut self, contract: EnergyCertificateContract) -> Self {
        self.contract = contract;
        self
    }

    /// Run a committing invocation.
    pub fn submit<T>(
        &self,
        op: impl FnOnce(&EnergyCertificateContract, &mut TxContext<'_>) -> Result<T>,
    ) -> Result<T> {
        self.contract.submit(&self.store, &self.ids, &self.clock, op)
    }

    /// Run a read-only invocation.
    pub fn evaluate<T>(
        &self,
        op: impl FnOnce(&EnergyCertificateContract, &TxContext<'_>) -> Result<T>,
    ) -> Result<T> {
        self.contract.evaluate(&self.store, &self.ids, &self.clock, op)
    }

    /// Issue a certificate, panicking on failure.
    pub fn create(&self, draft: NewCertificate) -> Issued {
        self.submit(|c, ctx| c.create(ctx, draft)).unwrap()
    }

    /// Read a certificate.
    pub fn read(&self, id: &CertificateId) -> Result<EnergyCertificate> {
        self.evaluate(|c, ctx| c.read(ctx, id))
    }

    /// Whether a certificate exists, panicking on store failure.
    pub fn exists(&self, id: &CertificateId) -> bool {
        self.evaluate(|c, ctx| c.exists(ctx, id)).unwrap()
    }

    /// Transfer a certificate to `to`.
    pub fn transfer(&self, id: &CertificateId, to: &str, price: f64) -> Result<TransferReceipt> {
        self.submit(|c, ctx| c.transfer(ctx, id, UserId::new(to), price))
    }
}

/// A certificate draft for `owner` produced by `producer`.
pub fn draft(owner: &str, producer: &str) -> NewCertificate {
    NewCertificate {
        owner_id: UserId::new(owner),
        producer_id: ProducerId::new(producer),
        emission_date: "2024-01-15".into(),
        usable_month: 2,
        usable_year: 2024,
        regulatory_authority_id: AuthorityId::new("reg-1"),
    }
}
