//! Append-only transaction ledger.
//!
//! Transactions are written once, under `TRANSACTION_<id>`, and never
//! modified. There is deliberately no update or delete here.

use certledger_core::{CertificateId, RecordKey, RecordKind, Transaction, UserId};
use certledger_store::TxContext;

use crate::error::{ContractError, Result};
use crate::query;
use crate::records;

/// Writes and reads transfer audit records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionLedger;

impl TransactionLedger {
    /// Stage `transaction` under its namespaced key and return that key.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Store` or `ContractError::Encode` if the write
    /// cannot be staged.
    pub fn record(&self, ctx: &mut TxContext<'_>, transaction: &Transaction) -> Result<String> {
        let key = records::save(ctx, transaction, "record")?;

        tracing::info!(
            transaction_key = %key,
            certificate_id = %transaction.certificate_ref,
            from = %transaction.from_user_id,
            to = %transaction.to_user_id,
            price = transaction.price,
            "Transaction recorded"
        );

        Ok(key)
    }

    /// Read the transaction under its full key, e.g. `TRANSACTION_<id>`.
    ///
    /// A key without the transaction prefix cannot name a transaction and is
    /// reported as not found.
    ///
    /// # Errors
    ///
    /// - `ContractError::NotFound` if nothing is stored under `key`.
    /// - `ContractError::Decode` if the stored bytes are not a transaction.
    /// - `ContractError::Store` if the read fails.
    pub fn read(&self, ctx: &TxContext<'_>, key: &str) -> Result<Transaction> {
        let key = RecordKey::parse(key);
        if key.kind() != RecordKind::Transaction {
            return Err(ContractError::not_found(RecordKind::Transaction, key.encode()));
        }

        tracing::debug!(transaction_key = %key, "Reading transaction");
        records::load(ctx, &key, "read")
    }

    /// Transfers sold by `user`.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Store` or `ContractError::Decode`.
    pub fn by_from_user(&self, ctx: &TxContext<'_>, user: &UserId) -> Result<Vec<Transaction>> {
        query::fetch(ctx, &query::transactions_from_user(user))
    }

    /// Transfers bought by `user`.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Store` or `ContractError::Decode`.
    pub fn by_to_user(&self, ctx: &TxContext<'_>, user: &UserId) -> Result<Vec<Transaction>> {
        query::fetch(ctx, &query::transactions_to_user(user))
    }

    /// Every transfer of `certificate`, including after it was deleted.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Store` or `ContractError::Decode`.
    pub fn by_certificate(
        &self,
        ctx: &TxContext<'_>,
        certificate: &CertificateId,
    ) -> Result<Vec<Transaction>> {
        query::fetch(ctx, &query::transactions_for_certificate(certificate))
    }
}
