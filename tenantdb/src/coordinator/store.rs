// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Tenant Store - single entry point over catalog, records and stats

use crate::catalog::SchemaCatalog;
use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::records::{BulkWriter, RecordRepository};
use crate::session::SessionManager;
use crate::stats::StatsAggregator;
use crate::storage::{StorageManager, Table};
use crate::types::{Content, RecordId, SchemaDescriptor, StoreStats};
use log::{info, warn};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Tenant Store - owns storage and sessions for one database
///
/// # Example
/// ```no_run
/// use tenantdb::TenantStore;
/// use serde_json::json;
///
/// let store = TenantStore::from_path("./tenant_data").expect("open store");
/// store.create_schema("shop1", Default::default(), vec![json!({"field": "name"})])?;
///
/// let mut body = serde_json::Map::new();
/// body.insert("name".to_string(), json!("Widget"));
/// let stored = store.create_record("shop1", body)?;
/// assert_eq!(stored["id"], json!(1));
/// # Ok::<(), tenantdb::StoreError>(())
/// ```
pub struct TenantStore {
    config: StoreConfig,
    sessions: SessionManager,
}

impl TenantStore {
    /// Open (or create) a store as described by `config`
    pub fn open(config: StoreConfig) -> StoreResult<Arc<Self>> {
        let storage =
            StorageManager::new(&config.path, config.storage_type, config.flush_on_commit)?;
        let sessions = SessionManager::new(storage, config.lock_stripes);

        info!(
            "Tenant store ready ({} backend, {} id policy)",
            config.storage_type, config.id_policy
        );
        Ok(Arc::new(Self { config, sessions }))
    }

    /// Open a sled-backed store at `path` with default settings
    pub fn from_path(path: impl AsRef<Path>) -> StoreResult<Arc<Self>> {
        Self::open(StoreConfig::new(path))
    }

    /// Non-durable store for tests and throwaway runs
    pub fn in_memory() -> StoreResult<Arc<Self>> {
        Self::open(StoreConfig::in_memory())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn catalog(&self) -> SchemaCatalog<'_> {
        SchemaCatalog::new(&self.sessions)
    }

    pub fn records(&self) -> RecordRepository<'_> {
        RecordRepository::new(&self.sessions, self.config.id_policy)
    }

    pub fn bulk(&self) -> BulkWriter<'_> {
        BulkWriter::new(&self.sessions, self.config.id_policy)
    }

    pub fn stats_aggregator(&self) -> StatsAggregator<'_> {
        StatsAggregator::new(&self.sessions)
    }

    // Convenience pass-throughs

    pub fn list_schemas(&self) -> StoreResult<Vec<SchemaDescriptor>> {
        self.catalog().list()
    }

    pub fn get_schema(&self, name: &str) -> StoreResult<Option<SchemaDescriptor>> {
        self.catalog().get(name)
    }

    pub fn create_schema(
        &self,
        name: &str,
        config: Content,
        fields: Vec<Value>,
    ) -> StoreResult<SchemaDescriptor> {
        self.catalog().create(name, config, fields)
    }

    pub fn delete_schema(&self, name: &str) -> StoreResult<bool> {
        self.catalog().delete(name)
    }

    pub fn list_records(&self, namespace: &str) -> StoreResult<Vec<Content>> {
        self.records().list(namespace)
    }

    pub fn get_record(&self, namespace: &str, id: RecordId) -> StoreResult<Option<Content>> {
        self.records().get(namespace, id)
    }

    pub fn create_record(&self, namespace: &str, content: Content) -> StoreResult<Content> {
        self.records().create(namespace, content)
    }

    pub fn create_records(
        &self,
        namespace: &str,
        contents: Vec<Content>,
    ) -> StoreResult<Vec<Content>> {
        self.bulk().create_many(namespace, contents)
    }

    pub fn update_record(
        &self,
        namespace: &str,
        id: RecordId,
        content: Content,
    ) -> StoreResult<Content> {
        self.records().update(namespace, id, content)
    }

    pub fn delete_record(&self, namespace: &str, id: RecordId) -> StoreResult<bool> {
        self.records().delete(namespace, id)
    }

    pub fn stats(&self) -> StoreResult<StoreStats> {
        self.stats_aggregator().stats()
    }

    /// Remove every record and every descriptor in one transaction.
    ///
    /// Development use only. Blocks all writers while it runs.
    pub fn clear_all(&self) -> StoreResult<usize> {
        let session = self.sessions.exclusive_session();
        let mut txn = session.begin();

        let mut removed = 0;
        for table in [Table::Records, Table::Schemas] {
            for (key, _) in txn.scan_prefix(table, &[])? {
                if txn.remove(table, key)? {
                    removed += 1;
                }
            }
        }
        txn.commit()?;

        warn!("Cleared all data: {} key(s) removed", removed);
        Ok(removed)
    }

    /// Force buffered writes to disk
    pub fn flush(&self) -> StoreResult<()> {
        self.sessions.storage().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clear_all_wipes_both_tables() {
        let store = TenantStore::in_memory().unwrap();
        store.create_schema("shop1", Content::new(), vec![]).unwrap();
        store.create_record("shop1", Content::new()).unwrap();
        store.create_record("shop2", Content::new()).unwrap();

        assert_eq!(store.clear_all().unwrap(), 3);
        assert_eq!(store.stats().unwrap(), StoreStats::default());
    }

    #[test]
    fn test_views_share_one_database() {
        let store = TenantStore::in_memory().unwrap();
        let mut body = Content::new();
        body.insert("name".to_string(), json!("Widget"));
        store.records().create("shop1", body).unwrap();
        assert_eq!(store.stats().unwrap().total_records, 1);
    }
}
