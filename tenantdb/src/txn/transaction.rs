// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Scoped write transactions
//!
//! A `WriteTxn` stages writes in memory and applies them with a single atomic
//! driver commit. Reads through the transaction see committed data overlaid
//! with the transaction's own staged writes, so a later step can observe what
//! an earlier step of the same transaction wrote (id allocation inside a bulk
//! insert depends on this).
//!
//! An uncommitted transaction rolls back when dropped: the staged writes are
//! discarded and nothing reaches the driver.

use super::state::{TransactionId, TransactionStatus};
use crate::error::{StoreError, StoreResult};
use crate::storage::keys;
use crate::storage::{StorageDriverError, StorageManager, Table, WriteBatch, WriteGuard};
use log::{debug, warn};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Staged {
    Put(Vec<u8>),
    Removed,
}

pub struct WriteTxn<'a> {
    id: TransactionId,
    storage: &'a StorageManager,
    staged: BTreeMap<(Table, Vec<u8>), Staged>,
    batch: WriteBatch,
    status: TransactionStatus,
}

impl<'a> WriteTxn<'a> {
    pub(crate) fn begin(storage: &'a StorageManager) -> Self {
        let id = TransactionId::new();
        debug!("{} begin", id);
        Self {
            id,
            storage,
            staged: BTreeMap::new(),
            batch: WriteBatch::new(),
            status: TransactionStatus::Active,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Read a key as this transaction sees it
    pub fn get(&self, table: Table, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        match self.staged.get(&(table, key.to_vec())) {
            Some(Staged::Put(value)) => Ok(Some(value.clone())),
            Some(Staged::Removed) => Ok(None),
            None => Ok(self.storage.tree(table).get(key)?),
        }
    }

    /// All entries under `prefix` as this transaction sees them, ascending by key
    pub fn scan_prefix(&self, table: Table, prefix: &[u8]) -> StoreResult<Vec<(Vec<u8>, Vec<u8>)>> {
        let mut merged = BTreeMap::new();
        for item in self.storage.tree(table).scan_prefix(prefix)? {
            let (key, value) = item?;
            merged.insert(key, value);
        }
        for (key, staged) in self.staged_with_prefix(table, prefix) {
            match staged {
                Staged::Put(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                Staged::Removed => {
                    merged.remove(key);
                }
            }
        }
        Ok(merged.into_iter().collect())
    }

    /// Greatest key under `prefix` as this transaction sees it
    pub fn last_key_with_prefix(&self, table: Table, prefix: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        let mut committed = None;
        for item in self.storage.tree(table).scan_prefix_rev(prefix)? {
            let (key, _) = item?;
            let removed = matches!(
                self.staged.get(&(table, key.clone())),
                Some(Staged::Removed)
            );
            if !removed {
                committed = Some(key);
                break;
            }
        }

        let staged = self
            .staged_with_prefix(table, prefix)
            .filter(|(_, staged)| matches!(staged, Staged::Put(_)))
            .map(|(key, _)| key.clone())
            .last();

        Ok(committed.max(staged))
    }

    /// Stage an insert of a key that must not exist yet.
    ///
    /// Returns `false` (and stages nothing) if the key is already visible.
    pub fn insert_new(&mut self, table: Table, key: Vec<u8>, value: Vec<u8>) -> StoreResult<bool> {
        if self.get(table, &key)?.is_some() {
            return Ok(false);
        }
        self.stage_put(table, key, value, WriteGuard::MustBeAbsent);
        Ok(true)
    }

    /// Stage an overwrite of a key that must already exist.
    ///
    /// Returns `false` (and stages nothing) if the key is not visible.
    pub fn update_existing(&mut self, table: Table, key: Vec<u8>, value: Vec<u8>) -> StoreResult<bool> {
        if self.get(table, &key)?.is_none() {
            return Ok(false);
        }
        self.stage_put(table, key, value, WriteGuard::MustExist);
        Ok(true)
    }

    /// Stage a removal; returns whether the key was visible
    pub fn remove(&mut self, table: Table, key: Vec<u8>) -> StoreResult<bool> {
        if self.get(table, &key)?.is_none() {
            return Ok(false);
        }
        self.batch.remove(table.as_str(), key.clone(), WriteGuard::None);
        self.staged.insert((table, key), Staged::Removed);
        Ok(true)
    }

    /// Apply every staged write atomically
    pub fn commit(mut self) -> StoreResult<()> {
        let result = self.storage.commit(&self.batch);
        match result {
            Ok(()) => {
                self.status = TransactionStatus::Committed;
                debug!("{} committed {} write(s)", self.id, self.batch.len());
                Ok(())
            }
            Err(StorageDriverError::GuardFailed { tree, key, guard }) => {
                self.status = TransactionStatus::RolledBack;
                warn!(
                    "{} rolled back: guard {:?} failed on {}",
                    self.id, guard, tree
                );
                Err(guard_error(&tree, &key, guard))
            }
            Err(e) => {
                self.status = TransactionStatus::RolledBack;
                warn!("{} rolled back: {}", self.id, e);
                Err(e.into())
            }
        }
    }

    /// Discard every staged write
    pub fn rollback(mut self) {
        self.discard();
    }

    fn discard(&mut self) {
        if self.status == TransactionStatus::Active {
            self.status = TransactionStatus::RolledBack;
            debug!(
                "{} rolled back, discarding {} staged write(s)",
                self.id,
                self.batch.len()
            );
            self.staged.clear();
            self.batch = WriteBatch::new();
        }
    }

    fn stage_put(&mut self, table: Table, key: Vec<u8>, value: Vec<u8>, guard: WriteGuard) {
        self.batch
            .put(table.as_str(), key.clone(), value.clone(), guard);
        self.staged.insert((table, key), Staged::Put(value));
    }

    fn staged_with_prefix<'s>(
        &'s self,
        table: Table,
        prefix: &'s [u8],
    ) -> impl Iterator<Item = (&'s Vec<u8>, &'s Staged)> + 's {
        self.staged
            .range((table, prefix.to_vec())..)
            .take_while(move |((t, key), _)| *t == table && key.starts_with(prefix))
            .map(|((_, key), staged)| (key, staged))
    }
}

impl Drop for WriteTxn<'_> {
    fn drop(&mut self) {
        self.discard();
    }
}

/// Translate a failed commit guard into the matching domain error
fn guard_error(tree: &str, key: &[u8], guard: WriteGuard) -> StoreError {
    match (Table::from_name(tree), guard) {
        (Some(Table::Records), WriteGuard::MustBeAbsent) => match keys::decode_record_key(key) {
            Some((namespace, id)) => StoreError::DuplicateId { namespace, id },
            None => StoreError::Storage(format!("malformed record key in {}", tree)),
        },
        (Some(Table::Records), WriteGuard::MustExist) => match keys::decode_record_key(key) {
            Some((namespace, id)) => StoreError::record_not_found(&namespace, id),
            None => StoreError::Storage(format!("malformed record key in {}", tree)),
        },
        (Some(Table::Schemas), WriteGuard::MustBeAbsent) => {
            StoreError::DuplicateName(keys::decode_schema_key(key).unwrap_or_default())
        }
        (Some(Table::Schemas), WriteGuard::MustExist) => StoreError::NotFound(format!(
            "schema {} not found",
            keys::decode_schema_key(key).unwrap_or_default()
        )),
        _ => StoreError::Storage(format!("unexpected write conflict on {}", tree)),
    }
}
