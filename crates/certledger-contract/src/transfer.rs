//! Ownership transfer protocol.
//!
//! A transfer is two writes that belong together: the certificate with its new
//! owner, and the [`Transaction`] audit record describing the hand-over.
//!
//! # Atomicity
//!
//! Both writes are staged in the invocation's [`TxContext`] and reach the
//! store in one [`RecordStore::write`](certledger_store::RecordStore::write)
//! batch when the invocation commits. The protocol itself performs no
//! rollback: if a backend applies batches partially, a failure can leave the
//! owner changed with no audit record. Any backend wired in here must apply
//! a batch all-or-nothing.

use serde::Serialize;

use certledger_core::{
    format_timestamp, CertificateId, EnergyCertificate, RecordKey, Transaction, TransactionId,
    UserId,
};
use certledger_store::TxContext;

use crate::error::Result;
use crate::ledger::TransactionLedger;
use crate::records;
use crate::repository::CertificateRepository;

/// Outcome of a successful transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferReceipt {
    /// Storage key of the audit record, `TRANSACTION_<id>`.
    pub transaction_key: String,
    /// The audit record that was written.
    pub transaction: Transaction,
    /// Confirmation message, `"<key> transaction created successfully"`.
    pub message: String,
}

/// Moves certificates between owners and records each move.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferProtocol {
    certificates: CertificateRepository,
    ledger: TransactionLedger,
}

impl TransferProtocol {
    /// Create a protocol over the given repository and ledger.
    #[must_use]
    pub const fn new(certificates: CertificateRepository, ledger: TransactionLedger) -> Self {
        Self {
            certificates,
            ledger,
        }
    }

    /// Transfer `certificate_id` to `new_owner` at `price`.
    ///
    /// The transaction id is the invocation id and the transaction date is
    /// the invocation timestamp. Transferring to the current owner and
    /// negative prices are both accepted.
    ///
    /// # Errors
    ///
    /// - `ContractError::NotFound` if the certificate does not exist.
    /// - `ContractError::Decode` if the stored certificate is malformed.
    /// - `ContractError::Encode` if the price is not a finite number.
    /// - `ContractError::Store` if a read or write fails.
    pub fn transfer(
        &self,
        ctx: &mut TxContext<'_>,
        certificate_id: &CertificateId,
        new_owner: UserId,
        price: f64,
    ) -> Result<TransferReceipt> {
        let mut certificate: EnergyCertificate = records::load(
            ctx,
            &RecordKey::Certificate(certificate_id.clone()),
            "transfer",
        )?;

        let previous_owner = certificate.change_owner(new_owner.clone());
        self.certificates.save(ctx, &certificate, "transfer")?;

        let transaction = Transaction::transfer(
            TransactionId::new(ctx.tx_id()),
            certificate.id.clone(),
            previous_owner,
            new_owner,
            format_timestamp(ctx.timestamp()),
            price,
        );
        let transaction_key = self.ledger.record(ctx, &transaction)?;

        tracing::info!(
            certificate_id = %certificate_id,
            from = %transaction.from_user_id,
            to = %transaction.to_user_id,
            transaction_key = %transaction_key,
            "Certificate transferred"
        );

        Ok(TransferReceipt {
            message: format!("{transaction_key} transaction created successfully"),
            transaction_key,
            transaction,
        })
    }
}
