//! In-memory storage implementation.
//!
//! Records live in an ordered map behind a single lock, so a batch is applied
//! while holding the write guard and is seen whole or not at all.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use certledger_core::Selector;

use crate::error::Result;
use crate::{RecordStore, WriteOp};

/// Map-backed [`RecordStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// All stored keys in order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.records.read().keys().cloned().collect()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.records.read().get(key).cloned())
    }

    fn query(&self, selector: &Selector) -> Result<Vec<(String, Vec<u8>)>> {
        let records = self.records.read();
        Ok(records
            .iter()
            .filter(|(key, value)| selector.matches(key, value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }

    fn write(&self, batch: Vec<WriteOp>) -> Result<()> {
        let mut records = self.records.write();
        for op in batch {
            match op {
                WriteOp::Put { key, value } => {
                    records.insert(key, value);
                }
                WriteOp::Delete { key } => {
                    records.remove(&key);
                }
            }
        }
        Ok(())
    }
}
