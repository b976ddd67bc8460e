// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory storage driver implementation for testing

use super::batch::{WriteBatch, WriteOp};
use super::traits::{KvIter, StorageDriver, StorageTree};
use super::types::{StorageDriverError, StorageResult};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

type TreeData = BTreeMap<Vec<u8>, Vec<u8>>;

/// In-memory storage driver for testing
///
/// All trees live behind one lock so that a multi-tree commit is observed
/// atomically by readers.
pub struct MemoryStorageDriver {
    trees: Arc<RwLock<HashMap<String, TreeData>>>,
}

/// In-memory tree handle
pub struct MemoryTree {
    name: String,
    trees: Arc<RwLock<HashMap<String, TreeData>>>,
}

impl MemoryStorageDriver {
    /// Create a new memory storage driver
    pub fn new() -> Self {
        Self {
            trees: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStorageDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTree {
    fn collect_prefix(&self, prefix: &[u8]) -> Vec<StorageResult<(Vec<u8>, Vec<u8>)>> {
        let trees = self.trees.read();
        match trees.get(&self.name) {
            Some(data) => data
                .range(prefix.to_vec()..)
                .take_while(|(k, _)| k.starts_with(prefix))
                .map(|(k, v)| Ok((k.clone(), v.clone())))
                .collect(),
            None => Vec::new(),
        }
    }
}

impl StorageTree for MemoryTree {
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        Ok(self
            .trees
            .read()
            .get(&self.name)
            .and_then(|data| data.get(key).cloned()))
    }

    fn iter(&self) -> StorageResult<KvIter<'_>> {
        Ok(Box::new(self.collect_prefix(&[]).into_iter()))
    }

    fn scan_prefix(&self, prefix: &[u8]) -> StorageResult<KvIter<'_>> {
        Ok(Box::new(self.collect_prefix(prefix).into_iter()))
    }

    fn scan_prefix_rev(&self, prefix: &[u8]) -> StorageResult<KvIter<'_>> {
        Ok(Box::new(self.collect_prefix(prefix).into_iter().rev()))
    }

    fn len(&self) -> StorageResult<usize> {
        Ok(self
            .trees
            .read()
            .get(&self.name)
            .map(|data| data.len())
            .unwrap_or(0))
    }
}

impl StorageDriver for MemoryStorageDriver {
    type Tree = Box<dyn StorageTree>;

    fn open<P: AsRef<Path>>(_path: P) -> StorageResult<Self> {
        Ok(Self::new())
    }

    fn open_tree(&self, name: &str) -> StorageResult<Self::Tree> {
        self.trees.write().entry(name.to_string()).or_default();

        Ok(Box::new(MemoryTree {
            name: name.to_string(),
            trees: self.trees.clone(),
        }) as Box<dyn StorageTree>)
    }

    fn commit(&self, batch: &WriteBatch) -> StorageResult<()> {
        let mut trees = self.trees.write();

        // Validate every guard against the state the batch would produce so far,
        // then apply. Nothing is written unless all guards hold.
        let mut overlay: HashMap<(&str, &[u8]), bool> = HashMap::new();
        for op in batch.ops() {
            let present = match overlay.get(&(op.tree(), op.key())) {
                Some(present) => *present,
                None => trees
                    .get(op.tree())
                    .map(|data| data.contains_key(op.key()))
                    .unwrap_or(false),
            };
            if !op.guard().admits(present) {
                return Err(StorageDriverError::GuardFailed {
                    tree: op.tree().to_string(),
                    key: op.key().to_vec(),
                    guard: op.guard(),
                });
            }
            overlay.insert(
                (op.tree(), op.key()),
                matches!(op, WriteOp::Put { .. }),
            );
        }

        for op in batch.ops() {
            let data = trees.entry(op.tree().to_string()).or_default();
            match op {
                WriteOp::Put { key, value, .. } => {
                    data.insert(key.clone(), value.clone());
                }
                WriteOp::Remove { key, .. } => {
                    data.remove(key);
                }
            }
        }
        Ok(())
    }

    fn flush(&self) -> StorageResult<()> {
        // No-op for memory storage
        Ok(())
    }

    fn shutdown(&mut self) -> StorageResult<()> {
        // No-op for memory storage
        Ok(())
    }
}
