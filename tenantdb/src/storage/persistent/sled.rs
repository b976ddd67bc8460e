// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Sled storage driver implementation

use super::batch::{WriteBatch, WriteGuard, WriteOp};
use super::traits::{KvIter, StorageDriver, StorageTree};
use super::types::{StorageDriverError, StorageResult};
use log::debug;
use sled::transaction::{
    ConflictableTransactionError, ConflictableTransactionResult, TransactionError,
    TransactionalTree,
};
use sled::Transactional;
use std::path::Path;
use std::thread;
use std::time::Duration;

const LOCK_RETRY_ATTEMPTS: u32 = 10;
const LOCK_RETRY_INITIAL_DELAY: Duration = Duration::from_millis(5);
const LOCK_RETRY_MAX_DELAY: Duration = Duration::from_millis(200);

/// Sled driver implementation
pub struct SledDriver {
    db: sled::Db,
}

/// Sled tree wrapper that implements StorageTree trait
pub struct SledTree {
    tree: sled::Tree,
}

/// Abort payload carried out of a sled transaction when a guard fails
#[derive(Debug, Clone)]
struct GuardViolation {
    tree: String,
    key: Vec<u8>,
    guard: WriteGuard,
}

fn backend_error(e: sled::Error) -> StorageDriverError {
    StorageDriverError::BackendSpecific(e.to_string())
}

/// Sled reports a held file lock as an `Io` error of kind `Other`; only the message identifies it
fn is_lock_contention(e: &sled::Error) -> bool {
    matches!(e, sled::Error::Io(io) if io.to_string().contains("could not acquire lock"))
}

/// Open the database, waiting out a lock still held by a handle that is shutting down
fn open_with_retry(path: &Path) -> sled::Result<sled::Db> {
    let mut delay = LOCK_RETRY_INITIAL_DELAY;
    let mut attempt = 1;
    loop {
        match sled::open(path) {
            Err(e) if attempt < LOCK_RETRY_ATTEMPTS && is_lock_contention(&e) => {
                debug!(
                    "sled lock on {} busy (attempt {}/{}), retrying in {:?}",
                    path.display(),
                    attempt,
                    LOCK_RETRY_ATTEMPTS,
                    delay
                );
                thread::sleep(delay);
                delay = (delay * 2).min(LOCK_RETRY_MAX_DELAY);
                attempt += 1;
            }
            result => return result,
        }
    }
}

fn box_iter<'a, I>(iter: I) -> KvIter<'a>
where
    I: Iterator<Item = sled::Result<(sled::IVec, sled::IVec)>> + 'a,
{
    Box::new(iter.map(|result| {
        result
            .map(|(k, v)| (k.to_vec(), v.to_vec()))
            .map_err(backend_error)
    }))
}

impl StorageTree for SledTree {
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        self.tree
            .get(key)
            .map_err(backend_error)
            .map(|opt| opt.map(|v| v.to_vec()))
    }

    fn iter(&self) -> StorageResult<KvIter<'_>> {
        Ok(box_iter(self.tree.iter()))
    }

    fn scan_prefix(&self, prefix: &[u8]) -> StorageResult<KvIter<'_>> {
        Ok(box_iter(self.tree.scan_prefix(prefix)))
    }

    fn scan_prefix_rev(&self, prefix: &[u8]) -> StorageResult<KvIter<'_>> {
        Ok(box_iter(self.tree.scan_prefix(prefix).rev()))
    }

    fn len(&self) -> StorageResult<usize> {
        Ok(self.tree.len())
    }
}

impl StorageDriver for SledDriver {
    type Tree = Box<dyn StorageTree>;

    fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let db = open_with_retry(path.as_ref()).map_err(backend_error)?;
        Ok(SledDriver { db })
    }

    fn open_tree(&self, name: &str) -> StorageResult<Self::Tree> {
        let tree = self.db.open_tree(name).map_err(backend_error)?;
        Ok(Box::new(SledTree { tree }) as Box<dyn StorageTree>)
    }

    fn commit(&self, batch: &WriteBatch) -> StorageResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let names = batch.tree_names();
        let trees = names
            .iter()
            .map(|name| self.db.open_tree(name))
            .collect::<Result<Vec<sled::Tree>, sled::Error>>()
            .map_err(backend_error)?;

        // Resolve each op to its tree view once; the closure below may be retried.
        let slots: Vec<usize> = batch
            .ops()
            .iter()
            .map(|op| names.iter().position(|n| *n == op.tree()).unwrap_or(0))
            .collect();

        let result = trees.as_slice().transaction(
            |views: &Vec<TransactionalTree>| -> ConflictableTransactionResult<(), GuardViolation> {
                for (op, slot) in batch.ops().iter().zip(slots.iter()) {
                    let view = &views[*slot];
                    if op.guard() != WriteGuard::None {
                        let present = view.get(op.key())?.is_some();
                        if !op.guard().admits(present) {
                            return Err(ConflictableTransactionError::Abort(GuardViolation {
                                tree: op.tree().to_string(),
                                key: op.key().to_vec(),
                                guard: op.guard(),
                            }));
                        }
                    }
                    match op {
                        WriteOp::Put { key, value, .. } => {
                            view.insert(key.as_slice(), value.as_slice())?;
                        }
                        WriteOp::Remove { key, .. } => {
                            view.remove(key.as_slice())?;
                        }
                    }
                }
                Ok(())
            },
        );

        match result {
            Ok(()) => Ok(()),
            Err(TransactionError::Abort(violation)) => Err(StorageDriverError::GuardFailed {
                tree: violation.tree,
                key: violation.key,
                guard: violation.guard,
            }),
            Err(TransactionError::Storage(e)) => Err(backend_error(e)),
        }
    }

    fn flush(&self) -> StorageResult<()> {
        self.db.flush().map_err(backend_error)?;
        Ok(())
    }

    fn shutdown(&mut self) -> StorageResult<()> {
        // Just flush to ensure data is persisted
        self.flush()
    }
}
