//! Certificate repository.
//!
//! CRUD over [`EnergyCertificate`] records. Ids come from the invocation
//! context; the repository keeps no state between calls besides its
//! [`UpdateMode`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use certledger_core::{
    CertificateId, EnergyCertificate, NewCertificate, ProducerId, RecordKey, RecordKind, UserId,
};
use certledger_store::TxContext;

use crate::error::{ContractError, Result};
use crate::query;
use crate::records;

/// How [`CertificateRepository::update`] treats the requested usable period.
///
/// Deployed ledgers have always re-written the stored certificate unchanged on
/// update. `Legacy` keeps that behaviour so replays produce the same world
/// state; `Apply` writes the new month and year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdateMode {
    /// Re-write the stored record as is, ignoring the new values.
    #[default]
    Legacy,
    /// Store the new usable month and year.
    Apply,
}

impl UpdateMode {
    /// Get the mode name as a string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Apply => "apply",
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateMode {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "apply" => Ok(Self::Apply),
            other => Err(ContractError::Validation(format!(
                "unknown update mode: {other}"
            ))),
        }
    }
}

/// Result of issuing a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issued {
    /// Id of the new certificate.
    pub id: CertificateId,
    /// Confirmation message, `"<id> created successfully"`.
    pub message: String,
}

/// Stores and retrieves energy certificates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CertificateRepository {
    update_mode: UpdateMode,
}

impl CertificateRepository {
    /// Create a repository with the given update behaviour.
    #[must_use]
    pub const fn new(update_mode: UpdateMode) -> Self {
        Self { update_mode }
    }

    /// The configured update behaviour.
    #[must_use]
    pub const fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    /// Whether a certificate is stored under `id`.
    ///
    /// An id in another record kind's namespace is never present.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Store` if the read fails.
    pub fn exists(&self, ctx: &TxContext<'_>, id: &CertificateId) -> Result<bool> {
        records::present(ctx, &RecordKey::Certificate(id.clone()), "exists")
    }

    /// Issue a certificate whose id is the invocation id.
    ///
    /// There is no existence check: a colliding id silently replaces the
    /// stored certificate.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Store` or `ContractError::Encode` if the write
    /// cannot be staged.
    pub fn create(&self, ctx: &mut TxContext<'_>, draft: NewCertificate) -> Result<Issued> {
        let id = CertificateId::new(ctx.tx_id());
        let certificate = EnergyCertificate::issue(id.clone(), draft);

        records::save(ctx, &certificate, "create")?;

        tracing::info!(
            certificate_id = %id,
            owner_id = %certificate.owner_id,
            producer_id = %certificate.producer_id,
            "Certificate created"
        );

        Ok(Issued {
            message: format!("{id} created successfully"),
            id,
        })
    }

    /// Read the certificate stored under `id`.
    ///
    /// # Errors
    ///
    /// - `ContractError::NotFound` if nothing is stored under `id`.
    /// - `ContractError::Decode` if the stored bytes are not a certificate.
    /// - `ContractError::Store` if the read fails.
    pub fn read(&self, ctx: &TxContext<'_>, id: &CertificateId) -> Result<EnergyCertificate> {
        tracing::debug!(certificate_id = %id, "Reading certificate");
        records::load(ctx, &RecordKey::Certificate(id.clone()), "read")
    }

    /// Re-write the certificate under `id` according to the [`UpdateMode`].
    ///
    /// In `Legacy` mode the stored record is decoded and written back
    /// unchanged; `usable_month` and `usable_year` are ignored.
    ///
    /// # Errors
    ///
    /// - `ContractError::NotFound` if nothing is stored under `id`.
    /// - `ContractError::Decode` if the stored bytes are not a certificate.
    /// - `ContractError::Store` if the read or write fails.
    pub fn update(
        &self,
        ctx: &mut TxContext<'_>,
        id: &CertificateId,
        usable_month: i32,
        usable_year: i32,
    ) -> Result<()> {
        let mut certificate: EnergyCertificate =
            records::load(ctx, &RecordKey::Certificate(id.clone()), "update")?;

        match self.update_mode {
            UpdateMode::Legacy => {
                tracing::warn!(
                    certificate_id = %id,
                    usable_month,
                    usable_year,
                    "Legacy update mode: requested usable period not applied"
                );
            }
            UpdateMode::Apply => certificate.set_usable_period(usable_month, usable_year),
        }

        records::save(ctx, &certificate, "update")?;

        tracing::info!(certificate_id = %id, mode = %self.update_mode, "Certificate updated");

        Ok(())
    }

    /// Permanently remove the certificate under `id`.
    ///
    /// Transactions that reference it are left in place.
    ///
    /// # Errors
    ///
    /// - `ContractError::NotFound` if nothing is stored under `id`.
    /// - `ContractError::Store` if the read or delete fails.
    pub fn delete(&self, ctx: &mut TxContext<'_>, id: &CertificateId) -> Result<()> {
        let key = RecordKey::Certificate(id.clone());
        if !records::present(ctx, &key, "delete")? {
            return Err(ContractError::not_found(RecordKind::Certificate, id.as_str()));
        }

        records::remove(ctx, &key, "delete")?;

        tracing::info!(certificate_id = %id, "Certificate deleted");

        Ok(())
    }

    /// Every certificate held by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Store` or `ContractError::Decode`.
    pub fn by_owner(&self, ctx: &TxContext<'_>, owner: &UserId) -> Result<Vec<EnergyCertificate>> {
        query::fetch(ctx, &query::certificates_by_owner(owner))
    }

    /// Every certificate issued for `producer`.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::Store` or `ContractError::Decode`.
    pub fn by_producer(
        &self,
        ctx: &TxContext<'_>,
        producer: &ProducerId,
    ) -> Result<Vec<EnergyCertificate>> {
        query::fetch(ctx, &query::certificates_by_producer(producer))
    }

    /// Stage `certificate` under its id.
    pub(crate) fn save(
        &self,
        ctx: &mut TxContext<'_>,
        certificate: &EnergyCertificate,
        operation: &'static str,
    ) -> Result<()> {
        records::save(ctx, certificate, operation).map(|_| ())
    }
}
