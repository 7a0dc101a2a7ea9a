//! Secondary-attribute lookups.
//!
//! Selector builders for every supported lookup, and [`fetch`], which runs a
//! selector and decodes the result set. One undecodable match fails the whole
//! query; nothing is skipped. Order is whatever the store yields.

use certledger_core::{
    certificate, transaction, CertificateId, EnergyCertificate, ProducerId, Record, Selector,
    Transaction, UserId,
};
use certledger_store::TxContext;

use crate::error::{ContractError, Result};

/// Certificates currently held by `owner`.
#[must_use]
pub fn certificates_by_owner(owner: &UserId) -> Selector {
    Selector::new(EnergyCertificate::KIND).eq(certificate::fields::OWNER_ID, owner.as_str())
}

/// Certificates issued for energy produced by `producer`.
#[must_use]
pub fn certificates_by_producer(producer: &ProducerId) -> Selector {
    Selector::new(EnergyCertificate::KIND).eq(certificate::fields::PRODUCER_ID, producer.as_str())
}

/// Transfers in which `user` was the seller.
#[must_use]
pub fn transactions_from_user(user: &UserId) -> Selector {
    Selector::new(Transaction::KIND).eq(transaction::fields::FROM_USER_ID, user.as_str())
}

/// Transfers in which `user` was the buyer.
#[must_use]
pub fn transactions_to_user(user: &UserId) -> Selector {
    Selector::new(Transaction::KIND).eq(transaction::fields::TO_USER_ID, user.as_str())
}

/// Every transfer of `certificate`.
#[must_use]
pub fn transactions_for_certificate(certificate: &CertificateId) -> Selector {
    Selector::new(Transaction::KIND).eq(transaction::fields::CERTIFICATE_REF, certificate.as_str())
}

/// Run `selector` and decode every match as `R`.
///
/// # Errors
///
/// - `ContractError::Store` if the store query fails.
/// - `ContractError::Decode` if any matched value is not an `R`.
pub fn fetch<R: Record>(ctx: &TxContext<'_>, selector: &Selector) -> Result<Vec<R>> {
    let rows = ctx
        .query(selector)
        .map_err(|e| ContractError::store("query", selector.to_query_string(), e))?;

    let records = rows
        .into_iter()
        .map(|(key, value)| R::decode(&value).map_err(|e| ContractError::codec(R::KIND, key, e)))
        .collect::<Result<Vec<R>>>()?;

    tracing::debug!(
        query = %selector.to_query_string(),
        results = records.len(),
        "Query executed"
    );

    Ok(records)
}
