//! Energy certificate records.

use serde::{Deserialize, Serialize};

use crate::codec::Record;
use crate::ids::{AuthorityId, CertificateId, ProducerId, UserId};
use crate::keys::{RecordKey, RecordKind};

/// Wire field names that selectors may address.
pub mod fields {
    /// Current owner.
    pub const OWNER_ID: &str = "ownerId";

    /// Producing party.
    pub const PRODUCER_ID: &str = "producerId";
}

/// One unit of certified energy production rights.
///
/// The id is the id of the invocation that issued the certificate and never
/// changes afterwards. Owner and usable period are mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnergyCertificate {
    /// Certificate id.
    #[serde(rename = "energyCertificateId")]
    pub id: CertificateId,

    /// Current owner.
    pub owner_id: UserId,

    /// Party that produced the energy.
    pub producer_id: ProducerId,

    /// ISO-8601 date of emission.
    pub emission_date: String,

    /// Month (1-12) in which the certificate may be used. Not range-checked.
    pub usable_month: i32,

    /// Year in which the certificate may be used.
    pub usable_year: i32,

    /// Certifying regulatory authority.
    #[serde(rename = "regulatoryAuthorityID")]
    pub regulatory_authority_id: AuthorityId,
}

/// Caller-supplied fields of a certificate about to be issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCertificate {
    /// Initial owner.
    pub owner_id: UserId,
    /// Party that produced the energy.
    pub producer_id: ProducerId,
    /// ISO-8601 date of emission.
    pub emission_date: String,
    /// Usable month.
    pub usable_month: i32,
    /// Usable year.
    pub usable_year: i32,
    /// Certifying regulatory authority.
    #[serde(rename = "regulatoryAuthorityID")]
    pub regulatory_authority_id: AuthorityId,
}

impl EnergyCertificate {
    /// Issue a certificate under `id`.
    #[must_use]
    pub fn issue(id: CertificateId, draft: NewCertificate) -> Self {
        Self {
            id,
            owner_id: draft.owner_id,
            producer_id: draft.producer_id,
            emission_date: draft.emission_date,
            usable_month: draft.usable_month,
            usable_year: draft.usable_year,
            regulatory_authority_id: draft.regulatory_authority_id,
        }
    }

    /// Hand the certificate to `new_owner`, returning the previous owner.
    pub fn change_owner(&mut self, new_owner: UserId) -> UserId {
        std::mem::replace(&mut self.owner_id, new_owner)
    }

    /// Replace the usable period.
    pub fn set_usable_period(&mut self, month: i32, year: i32) {
        self.usable_month = month;
        self.usable_year = year;
    }
}

impl Record for EnergyCertificate {
    const KIND: RecordKind = RecordKind::Certificate;

    fn key(&self) -> RecordKey {
        RecordKey::Certificate(self.id.clone())
    }
}
