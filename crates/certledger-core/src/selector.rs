//! Equality selectors for secondary-attribute lookups.
//!
//! A [`Selector`] names the record kind it applies to and a set of
//! `field == value` constraints on the record's wire fields. Stores evaluate
//! it however they like; [`Selector::matches`] is the reference semantics for
//! backends without a native query engine, and [`Selector::to_query_string`]
//! renders the Mango form understood by CouchDB-style state databases.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::keys::RecordKind;

/// A structured equality-match expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    kind: RecordKind,
    fields: BTreeMap<String, Value>,
}

impl Selector {
    /// An empty selector matching every record of `kind`.
    #[must_use]
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            fields: BTreeMap::new(),
        }
    }

    /// Add a `field == value` constraint.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// The record kind this selector is scoped to.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Whether a stored `(key, value)` pair satisfies the selector.
    ///
    /// Values that are not JSON objects never match.
    #[must_use]
    pub fn matches(&self, key: &str, value: &[u8]) -> bool {
        if RecordKind::of_key(key) != self.kind {
            return false;
        }

        let Ok(Value::Object(document)) = serde_json::from_slice::<Value>(value) else {
            return false;
        };

        self.fields
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }

    /// Render as a Mango query string: `{"selector":{"field":"value"}}`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        serde_json::json!({ "selector": self.fields }).to_string()
    }
}
