//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `RecordStore` trait.
//! Every record lives in the `world_state` column family; commits go through a
//! `WriteBatch` so an invocation's writes land together.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use certledger_core::Selector;

use crate::error::{Result, StoreError};
use crate::schema::{all_column_families, cf};
use crate::{RecordStore, WriteOp};

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }
}

impl RecordStore for RocksStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let cf = self.cf(cf::WORLD_STATE)?;

        self.db
            .get_cf(&cf, key.as_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let cf = self.cf(cf::WORLD_STATE)?;

        self.db
            .put_cf(&cf, key.as_bytes(), value)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn delete(&self, key: &str) -> Result<()> {
        let cf = self.cf(cf::WORLD_STATE)?;

        self.db
            .delete_cf(&cf, key.as_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn query(&self, selector: &Selector) -> Result<Vec<(String, Vec<u8>)>> {
        let cf = self.cf(cf::WORLD_STATE)?;

        let mut matches = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            let key = std::str::from_utf8(&key)
                .map_err(|e| StoreError::InvalidKey(e.to_string()))?;

            if selector.matches(key, &value) {
                matches.push((key.to_owned(), value.to_vec()));
            }
        }

        tracing::trace!(
            query = %selector.to_query_string(),
            matches = matches.len(),
            "World state scanned"
        );

        Ok(matches)
    }

    fn write(&self, batch: Vec<WriteOp>) -> Result<()> {
        let cf = self.cf(cf::WORLD_STATE)?;

        let mut write_batch = WriteBatch::default();
        for op in &batch {
            match op {
                WriteOp::Put { key, value } => write_batch.put_cf(&cf, key.as_bytes(), value),
                WriteOp::Delete { key } => write_batch.delete_cf(&cf, key.as_bytes()),
            }
        }

        // Write atomically
        self.db
            .write(write_batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}
