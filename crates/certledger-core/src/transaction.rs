//! Transfer audit records.
//!
//! A [`Transaction`] is written once, when a certificate changes hands, and is
//! never updated or deleted. It may outlive the certificate it references.

use serde::{Deserialize, Serialize};

use crate::codec::Record;
use crate::error::{CodecError, Result};
use crate::ids::{CertificateId, TransactionId, UserId};
use crate::keys::{RecordKey, RecordKind};

/// Wire field names that selectors may address.
pub mod fields {
    /// Seller.
    pub const FROM_USER_ID: &str = "fromUserId";

    /// Buyer.
    pub const TO_USER_ID: &str = "toUserId";

    /// Transferred certificate.
    pub const CERTIFICATE_REF: &str = "tokenRef";
}

/// An immutable record of one ownership transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Transaction {
    /// Id of the transfer invocation.
    pub transaction_id: TransactionId,

    /// The transferred certificate.
    #[serde(rename = "tokenRef")]
    pub certificate_ref: CertificateId,

    /// Owner before the transfer.
    pub from_user_id: UserId,

    /// Owner after the transfer.
    pub to_user_id: UserId,

    /// RFC 3339 time of the transfer.
    pub transaction_date: String,

    /// Agreed price. Not checked for sign.
    pub price: f64,
}

impl Transaction {
    /// Build the audit record for a transfer.
    #[must_use]
    pub fn transfer(
        transaction_id: TransactionId,
        certificate_ref: CertificateId,
        from_user_id: UserId,
        to_user_id: UserId,
        transaction_date: String,
        price: f64,
    ) -> Self {
        Self {
            transaction_id,
            certificate_ref,
            from_user_id,
            to_user_id,
            transaction_date,
            price,
        }
    }
}

impl Record for Transaction {
    const KIND: RecordKind = RecordKind::Transaction;

    fn key(&self) -> RecordKey {
        RecordKey::Transaction(self.transaction_id.clone())
    }

    // JSON has no NaN or infinity; serde_json would write `null` and the
    // record would no longer decode.
    fn encode(&self) -> Result<Vec<u8>> {
        if !self.price.is_finite() {
            return Err(CodecError::Encode(format!(
                "price must be finite, got {}",
                self.price
            )));
        }
        serde_json::to_vec(self).map_err(|e| CodecError::Encode(e.to_string()))
    }
}
