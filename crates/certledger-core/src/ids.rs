//! Identifier types for the certificate ledger.
//!
//! Every identifier is an opaque string handed to us by the caller or by the
//! invocation context. The newtypes exist so a certificate id cannot be passed
//! where a user id is expected; on the wire they are plain strings.
//!
//! # Macro-based ID Types
//!
//! The `string_id_type!` macro keeps the trait surface of every identifier
//! identical: serde as a bare string, `Display`, `Debug`, conversions from
//! `String`/`&str` and `AsRef<str>`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define a string-backed identifier type with standard trait implementations.
///
/// # Example
///
/// ```ignore
/// string_id_type!(MyId, "A custom identifier type.");
/// let id = MyId::new("abc");
/// assert_eq!(id.as_str(), "abc");
/// ```
macro_rules! string_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the raw string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id_type!(
    CertificateId,
    "An energy certificate identifier.\n\nAssigned from the id of the invocation that created the certificate; never chosen by callers."
);
string_id_type!(
    TransactionId,
    "A transfer transaction identifier.\n\nEqual to the id of the invocation that performed the transfer."
);
string_id_type!(UserId, "An owner or trading counterpart identifier.");
string_id_type!(ProducerId, "The identifier of the plant or party that produced the energy.");
string_id_type!(
    AuthorityId,
    "The identifier of the regulatory authority that certified the production."
);
