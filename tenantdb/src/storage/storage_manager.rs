// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage Manager - owns the storage driver and the two tables
//!
//! The manager is created once per store and shared by reference with every
//! session. It holds no data of its own beyond driver and tree handles.

use crate::error::StoreResult;
use crate::storage::persistent::{
    create_storage_driver, BoxedDriver, StorageResult, StorageTree, StorageType, WriteBatch,
};
use log::{debug, info, warn};
use std::path::Path;

/// The tables of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Table {
    /// Schema descriptors keyed by name
    Schemas,
    /// Records keyed by (namespace, record id)
    Records,
}

impl Table {
    pub const ALL: [Table; 2] = [Table::Schemas, Table::Records];

    /// Tree name in the storage driver
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Schemas => "schemas",
            Table::Records => "records",
        }
    }

    pub fn from_name(name: &str) -> Option<Table> {
        Table::ALL.into_iter().find(|table| table.as_str() == name)
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage manager holding the single driver instance for the process
pub struct StorageManager {
    driver: BoxedDriver,
    schemas: Box<dyn StorageTree>,
    records: Box<dyn StorageTree>,
    flush_on_commit: bool,
}

impl StorageManager {
    /// Open the backend at `path` and make sure both tables exist
    pub fn new<P: AsRef<Path>>(
        path: P,
        storage_type: StorageType,
        flush_on_commit: bool,
    ) -> StoreResult<Self> {
        info!(
            "Initializing {} storage at path: {:?}",
            storage_type,
            path.as_ref()
        );

        let driver = create_storage_driver(storage_type, path.as_ref())?;
        let schemas = driver.open_tree(Table::Schemas.as_str())?;
        let records = driver.open_tree(Table::Records.as_str())?;
        debug!(
            "Opened trees: {}, {}",
            Table::Schemas.as_str(),
            Table::Records.as_str()
        );

        Ok(Self {
            driver,
            schemas,
            records,
            flush_on_commit,
        })
    }

    pub fn tree(&self, table: Table) -> &dyn StorageTree {
        match table {
            Table::Schemas => self.schemas.as_ref(),
            Table::Records => self.records.as_ref(),
        }
    }

    /// Apply a batch atomically, flushing afterwards if configured to
    pub fn commit(&self, batch: &WriteBatch) -> StorageResult<()> {
        self.driver.commit(batch)?;
        if self.flush_on_commit {
            self.driver.flush()?;
        }
        Ok(())
    }

    pub fn flush(&self) -> StoreResult<()> {
        Ok(self.driver.flush()?)
    }
}

impl Drop for StorageManager {
    fn drop(&mut self) {
        if let Err(e) = self.driver.shutdown() {
            warn!("Failed to flush storage on shutdown: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert_eq!(Table::from_name("records"), Some(Table::Records));
        assert_eq!(Table::from_name("schemas"), Some(Table::Schemas));
        assert_eq!(Table::from_name("nodes"), None);
    }

    #[test]
    fn test_memory_manager_opens_both_tables() {
        let manager = StorageManager::new("", StorageType::Memory, false).unwrap();
        assert_eq!(manager.tree(Table::Schemas).len().unwrap(), 0);
        assert_eq!(manager.tree(Table::Records).len().unwrap(), 0);
    }
}
