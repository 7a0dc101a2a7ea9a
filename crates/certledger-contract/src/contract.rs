//! The contract surface callers invoke.

use certledger_core::{
    CertificateId, Clock, EnergyCertificate, IdProvider, NewCertificate, ProducerId, Transaction,
    UserId,
};
use certledger_store::{RecordStore, TxContext};

use crate::error::{ContractError, Result};
use crate::ledger::TransactionLedger;
use crate::repository::{CertificateRepository, Issued, UpdateMode};
use crate::transfer::{TransferProtocol, TransferReceipt};

/// Every certificate and transaction operation behind one value.
///
/// Operations take the invocation's [`TxContext`]. [`submit`](Self::submit)
/// and [`evaluate`](Self::evaluate) open that context for callers that do not
/// manage invocations themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyCertificateContract {
    certificates: CertificateRepository,
    ledger: TransactionLedger,
    transfers: TransferProtocol,
}

impl EnergyCertificateContract {
    /// Create a contract with the given update behaviour.
    #[must_use]
    pub const fn new(update_mode: UpdateMode) -> Self {
        let certificates = CertificateRepository::new(update_mode);
        let ledger = TransactionLedger;
        Self {
            certificates,
            ledger,
            transfers: TransferProtocol::new(certificates, ledger),
        }
    }

    /// The certificate repository.
    #[must_use]
    pub const fn certificates(&self) -> &CertificateRepository {
        &self.certificates
    }

    /// Run `op` in a fresh invocation and commit its writes if it succeeds.
    ///
    /// # Errors
    ///
    /// Returns the operation's error (nothing is committed then), or
    /// `ContractError::Store` if the commit is rejected.
    pub fn submit<T>(
        &self,
        store: &dyn RecordStore,
        ids: &dyn IdProvider,
        clock: &dyn Clock,
        op: impl FnOnce(&Self, &mut TxContext<'_>) -> Result<T>,
    ) -> Result<T> {
        let mut ctx = TxContext::begin(store, ids, clock);
        let tx_id = ctx.tx_id().to_owned();

        let output = op(self, &mut ctx)?;
        ctx.commit()
            .map_err(|e| ContractError::store("commit", tx_id, e))?;

        Ok(output)
    }

    /// Run a read-only `op` in a fresh invocation. Nothing is committed.
    ///
    /// # Errors
    ///
    /// Returns the operation's error.
    pub fn evaluate<T>(
        &self,
        store: &dyn RecordStore,
        ids: &dyn IdProvider,
        clock: &dyn Clock,
        op: impl FnOnce(&Self, &TxContext<'_>) -> Result<T>,
    ) -> Result<T> {
        let ctx = TxContext::begin(store, ids, clock);
        op(self, &ctx)
    }

    /// See [`CertificateRepository::exists`].
    ///
    /// # Errors
    ///
    /// Propagates repository errors.
    pub fn exists(&self, ctx: &TxContext<'_>, id: &CertificateId) -> Result<bool> {
        self.certificates.exists(ctx, id)
    }

    /// See [`CertificateRepository::create`].
    ///
    /// # Errors
    ///
    /// Propagates repository errors.
    pub fn create(&self, ctx: &mut TxContext<'_>, draft: NewCertificate) -> Result<Issued> {
        self.certificates.create(ctx, draft)
    }

    /// See [`CertificateRepository::read`].
    ///
    /// # Errors
    ///
    /// Propagates repository errors.
    pub fn read(&self, ctx: &TxContext<'_>, id: &CertificateId) -> Result<EnergyCertificate> {
        self.certificates.read(ctx, id)
    }

    /// See [`CertificateRepository::update`].
    ///
    /// # Errors
    ///
    /// Propagates repository errors.
    pub fn update(
        &self,
        ctx: &mut TxContext<'_>,
        id: &CertificateId,
        usable_month: i32,
        usable_year: i32,
    ) -> Result<()> {
        self.certificates.update(ctx, id, usable_month, usable_year)
    }

    /// See [`CertificateRepository::delete`].
    ///
    /// # Errors
    ///
    /// Propagates repository errors.
    pub fn delete(&self, ctx: &mut TxContext<'_>, id: &CertificateId) -> Result<()> {
        self.certificates.delete(ctx, id)
    }

    /// See [`TransferProtocol::transfer`].
    ///
    /// # Errors
    ///
    /// Propagates transfer errors.
    pub fn transfer(
        &self,
        ctx: &mut TxContext<'_>,
        id: &CertificateId,
        new_owner: UserId,
        price: f64,
    ) -> Result<TransferReceipt> {
        self.transfers.transfer(ctx, id, new_owner, price)
    }

    /// Read a certificate by id. Same result as [`read`](Self::read).
    ///
    /// # Errors
    ///
    /// Propagates repository errors.
    pub fn query_certificate(
        &self,
        ctx: &TxContext<'_>,
        id: &CertificateId,
    ) -> Result<EnergyCertificate> {
        self.certificates.read(ctx, id)
    }

    /// Read a transaction by its full key.
    ///
    /// # Errors
    ///
    /// Propagates ledger errors.
    pub fn query_transaction(&self, ctx: &TxContext<'_>, key: &str) -> Result<Transaction> {
        self.ledger.read(ctx, key)
    }

    /// Certificates held by `owner`.
    ///
    /// # Errors
    ///
    /// Propagates query errors.
    pub fn certificates_by_owner(
        &self,
        ctx: &TxContext<'_>,
        owner: &UserId,
    ) -> Result<Vec<EnergyCertificate>> {
        self.certificates.by_owner(ctx, owner)
    }

    /// Certificates issued for `producer`.
    ///
    /// # Errors
    ///
    /// Propagates query errors.
    pub fn certificates_by_producer(
        &self,
        ctx: &TxContext<'_>,
        producer: &ProducerId,
    ) -> Result<Vec<EnergyCertificate>> {
        self.certificates.by_producer(ctx, producer)
    }

    /// Transfers sold by `user`.
    ///
    /// # Errors
    ///
    /// Propagates query errors.
    pub fn transactions_by_from_user(
        &self,
        ctx: &TxContext<'_>,
        user: &UserId,
    ) -> Result<Vec<Transaction>> {
        self.ledger.by_from_user(ctx, user)
    }

    /// Transfers bought by `user`.
    ///
    /// # Errors
    ///
    /// Propagates query errors.
    pub fn transactions_by_to_user(
        &self,
        ctx: &TxContext<'_>,
        user: &UserId,
    ) -> Result<Vec<Transaction>> {
        self.ledger.by_to_user(ctx, user)
    }

    /// Transfers of `certificate`.
    ///
    /// # Errors
    ///
    /// Propagates query errors.
    pub fn transactions_by_certificate(
        &self,
        ctx: &TxContext<'_>,
        certificate: &CertificateId,
    ) -> Result<Vec<Transaction>> {
        self.ledger.by_certificate(ctx, certificate)
    }
}
