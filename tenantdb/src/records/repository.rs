// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Record repository
//!
//! CRUD over the records of one namespace at a time. The stored body always
//! carries an `id` equal to the record's key: `create` injects the allocated
//! id and `update` overwrites whatever id the caller sent.

use super::allocation::next_record_id;
use super::validate_namespace;
use crate::config::IdPolicy;
use crate::error::{StoreError, StoreResult};
use crate::session::SessionManager;
use crate::storage::data_adapter::StoredRecord;
use crate::storage::{keys, Table};
use crate::txn::WriteTxn;
use crate::types::document::{inject_id, supplied_id};
use crate::types::{Content, RecordId};
use chrono::Utc;
use log::debug;

pub struct RecordRepository<'a> {
    sessions: &'a SessionManager,
    policy: IdPolicy,
}

impl<'a> RecordRepository<'a> {
    pub(crate) fn new(sessions: &'a SessionManager, policy: IdPolicy) -> Self {
        Self { sessions, policy }
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.policy
    }

    /// Record bodies of `namespace`, ascending by id
    pub fn list(&self, namespace: &str) -> StoreResult<Vec<Content>> {
        validate_namespace(namespace)?;
        let session = self.sessions.read_session();
        let tree = session.storage().tree(Table::Records);

        let mut contents = Vec::new();
        for item in tree.scan_prefix(&keys::namespace_prefix(namespace))? {
            let (_, value) = item?;
            contents.push(StoredRecord::from_bytes(&value)?.content()?);
        }
        Ok(contents)
    }

    pub fn get(&self, namespace: &str, id: RecordId) -> StoreResult<Option<Content>> {
        validate_namespace(namespace)?;
        let session = self.sessions.read_session();
        match session
            .storage()
            .tree(Table::Records)
            .get(&keys::record_key(namespace, id))?
        {
            Some(bytes) => Ok(Some(StoredRecord::from_bytes(&bytes)?.content()?)),
            None => Ok(None),
        }
    }

    /// Insert one record, allocating an id unless the body supplies one.
    ///
    /// Returns the stored body, `id` included.
    pub fn create(&self, namespace: &str, content: Content) -> StoreResult<Content> {
        validate_namespace(namespace)?;
        let session = self.sessions.write_session(namespace);
        let mut txn = session.begin();
        let stored = insert_one(&mut txn, namespace, content, self.policy)?;
        txn.commit()?;
        Ok(stored)
    }

    /// Replace the body of an existing record. The body's `id` is forced to `id`.
    pub fn update(
        &self,
        namespace: &str,
        id: RecordId,
        mut content: Content,
    ) -> StoreResult<Content> {
        validate_namespace(namespace)?;
        inject_id(&mut content, id);

        let session = self.sessions.write_session(namespace);
        let mut txn = session.begin();
        let key = keys::record_key(namespace, id);
        let existing = match txn.get(Table::Records, &key)? {
            Some(bytes) => StoredRecord::from_bytes(&bytes)?,
            None => return Err(StoreError::record_not_found(namespace, id)),
        };

        let revised = existing.revise(&content, Utc::now())?;
        if !txn.update_existing(Table::Records, key, revised.to_bytes()?)? {
            return Err(StoreError::record_not_found(namespace, id));
        }
        txn.commit()?;

        debug!("Updated record {} in {}", id, namespace);
        Ok(content)
    }

    /// Returns whether a record was removed
    pub fn delete(&self, namespace: &str, id: RecordId) -> StoreResult<bool> {
        validate_namespace(namespace)?;
        let session = self.sessions.write_session(namespace);
        let mut txn = session.begin();
        let removed = txn.remove(Table::Records, keys::record_key(namespace, id))?;
        txn.commit()?;

        if removed {
            debug!("Deleted record {} from {}", id, namespace);
        }
        Ok(removed)
    }
}

/// Stage the insert of one record inside `txn`; shared by single and bulk writes
pub(crate) fn insert_one(
    txn: &mut WriteTxn<'_>,
    namespace: &str,
    mut content: Content,
    policy: IdPolicy,
) -> StoreResult<Content> {
    let id = match supplied_id(&content, policy)? {
        Some(id) => id,
        None => next_record_id(txn, namespace)?,
    };
    inject_id(&mut content, id);

    let record = StoredRecord::new(namespace, id, &content, Utc::now())?;
    if !txn.insert_new(Table::Records, keys::record_key(namespace, id), record.to_bytes()?)? {
        return Err(StoreError::DuplicateId {
            namespace: namespace.to_string(),
            id,
        });
    }

    debug!("{} staged record {} in {}", txn.id(), id, namespace);
    Ok(content)
}
