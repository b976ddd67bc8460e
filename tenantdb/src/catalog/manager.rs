// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog manager over the `schemas` table

use crate::error::{StoreError, StoreResult};
use crate::session::SessionManager;
use crate::storage::data_adapter::StoredSchema;
use crate::storage::{keys, Table};
use crate::types::{Content, SchemaDescriptor};
use chrono::Utc;
use log::{debug, info};
use serde_json::Value;

/// CRUD over schema descriptors
///
/// A lightweight view borrowed from a `TenantStore`; every call acquires and
/// releases its own session.
pub struct SchemaCatalog<'a> {
    sessions: &'a SessionManager,
}

impl<'a> SchemaCatalog<'a> {
    pub(crate) fn new(sessions: &'a SessionManager) -> Self {
        Self { sessions }
    }

    /// All descriptors, ascending by name
    pub fn list(&self) -> StoreResult<Vec<SchemaDescriptor>> {
        let session = self.sessions.read_session();
        let tree = session.storage().tree(Table::Schemas);

        let mut descriptors = Vec::new();
        for item in tree.iter()? {
            let (_, value) = item?;
            descriptors.push(StoredSchema::from_bytes(&value)?.to_descriptor()?);
        }
        Ok(descriptors)
    }

    pub fn get(&self, name: &str) -> StoreResult<Option<SchemaDescriptor>> {
        let session = self.sessions.read_session();
        match session
            .storage()
            .tree(Table::Schemas)
            .get(&keys::schema_key(name))?
        {
            Some(bytes) => Ok(Some(StoredSchema::from_bytes(&bytes)?.to_descriptor()?)),
            None => Ok(None),
        }
    }

    /// Store a new descriptor.
    ///
    /// Fails with `DuplicateName` if `name` is taken, `Validation` if it is empty.
    pub fn create(
        &self,
        name: &str,
        config: Content,
        fields: Vec<Value>,
    ) -> StoreResult<SchemaDescriptor> {
        if name.trim().is_empty() {
            return Err(StoreError::Validation(
                "schema name must not be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let descriptor = SchemaDescriptor {
            name: name.to_string(),
            config,
            fields,
            created_at: now,
            updated_at: now,
        };
        let value = StoredSchema::from_descriptor(&descriptor)?.to_bytes()?;

        let session = self.sessions.write_session(name);
        let mut txn = session.begin();
        if !txn.insert_new(Table::Schemas, keys::schema_key(name), value)? {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        txn.commit()?;

        info!("Created schema '{}'", name);
        Ok(descriptor)
    }

    /// Delete the descriptor and every record of the namespace with the same
    /// name, atomically. Returns whether the descriptor existed.
    pub fn delete(&self, name: &str) -> StoreResult<bool> {
        let session = self.sessions.write_session(name);
        let mut txn = session.begin();

        let records = txn.scan_prefix(Table::Records, &keys::namespace_prefix(name))?;
        let cascaded = records.len();
        for (key, _) in records {
            txn.remove(Table::Records, key)?;
        }
        let existed = txn.remove(Table::Schemas, keys::schema_key(name))?;
        txn.commit()?;

        if existed {
            info!("Deleted schema '{}' and {} record(s)", name, cascaded);
        } else {
            debug!(
                "Schema '{}' not found; removed {} orphan record(s)",
                name, cascaded
            );
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StorageManager, StorageType};
    use serde_json::json;

    fn sessions() -> SessionManager {
        let storage = StorageManager::new("", StorageType::Memory, false).unwrap();
        SessionManager::new(storage, 4)
    }

    #[test]
    fn test_create_then_get_returns_descriptor_verbatim() {
        let sessions = sessions();
        let catalog = SchemaCatalog::new(&sessions);

        let mut config = Content::new();
        config.insert("color".to_string(), json!("blue"));
        let created = catalog
            .create("shop1", config.clone(), vec![json!({"field": "name"})])
            .unwrap();

        let fetched = catalog.get("shop1").unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.config, config);
        assert!(catalog.get("shop2").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let sessions = sessions();
        let catalog = SchemaCatalog::new(&sessions);
        catalog.create("shop1", Content::new(), vec![]).unwrap();

        let err = catalog.create("shop1", Content::new(), vec![]).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(ref n) if n == "shop1"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let sessions = sessions();
        let catalog = SchemaCatalog::new(&sessions);
        let err = catalog.create("  ", Content::new(), vec![]).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn test_list_is_sorted_by_name() {
        let sessions = sessions();
        let catalog = SchemaCatalog::new(&sessions);
        for name in ["zeta", "alpha", "mid"] {
            catalog.create(name, Content::new(), vec![]).unwrap();
        }
        let names: Vec<String> = catalog.list().unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_delete_reports_existence() {
        let sessions = sessions();
        let catalog = SchemaCatalog::new(&sessions);
        catalog.create("shop1", Content::new(), vec![]).unwrap();
        assert!(catalog.delete("shop1").unwrap());
        assert!(!catalog.delete("shop1").unwrap());
        assert!(catalog.list().unwrap().is_empty());
    }
}
