//! Per-invocation transaction context.
//!
//! A [`TxContext`] is opened for every external call. It fixes the
//! invocation's unique id and timestamp up front and buffers every write in a
//! write set. Point reads see the buffered writes; queries see committed state
//! only. [`TxContext::commit`] hands the write set to the store as a single
//! atomic batch, and dropping the context without committing discards it.

use std::collections::BTreeMap;

use certledger_core::{Clock, IdProvider, Selector};
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::{RecordStore, WriteOp};

/// State of one external invocation against a [`RecordStore`].
pub struct TxContext<'a> {
    store: &'a dyn RecordStore,
    tx_id: String,
    timestamp: DateTime<Utc>,
    writes: BTreeMap<String, Option<Vec<u8>>>,
}

impl<'a> TxContext<'a> {
    /// Open a context, drawing one id from `ids` and one instant from `clock`.
    pub fn begin(store: &'a dyn RecordStore, ids: &dyn IdProvider, clock: &dyn Clock) -> Self {
        let tx_id = ids.next_id();
        tracing::trace!(tx_id = %tx_id, "Invocation started");
        Self {
            store,
            tx_id,
            timestamp: clock.now(),
            writes: BTreeMap::new(),
        }
    }

    /// The invocation's unique id.
    #[must_use]
    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    /// The invocation's timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Read `key`, seeing this invocation's own staged writes first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.writes.get(key) {
            Some(staged) => Ok(staged.clone()),
            None => self.store.get(key),
        }
    }

    /// Stage `value` under `key`.
    ///
    /// # Errors
    ///
    /// Staging itself does not fail; errors surface at [`TxContext::commit`].
    pub fn put_state(&mut self, key: impl Into<String>, value: Vec<u8>) -> Result<()> {
        self.writes.insert(key.into(), Some(value));
        Ok(())
    }

    /// Stage the removal of `key`.
    ///
    /// # Errors
    ///
    /// Staging itself does not fail; errors surface at [`TxContext::commit`].
    pub fn del_state(&mut self, key: impl Into<String>) -> Result<()> {
        self.writes.insert(key.into(), None);
        Ok(())
    }

    /// Run `selector` against committed state.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn query(&self, selector: &Selector) -> Result<Vec<(String, Vec<u8>)>> {
        self.store.query(selector)
    }

    /// Number of keys with a staged write.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Apply every staged write atomically. Returns the number of keys written.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the batch; in that case nothing
    /// from this invocation is visible.
    pub fn commit(self) -> Result<usize> {
        let count = self.writes.len();
        if count == 0 {
            return Ok(0);
        }

        let batch = self
            .writes
            .into_iter()
            .map(|(key, value)| match value {
                Some(value) => WriteOp::Put { key, value },
                None => WriteOp::Delete { key },
            })
            .collect();

        self.store.write(batch)?;
        tracing::debug!(tx_id = %self.tx_id, writes = count, "Invocation committed");

        Ok(count)
    }
}
