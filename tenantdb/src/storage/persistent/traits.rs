// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage driver traits
//!
//! This module defines the core traits for storage drivers and trees.
//! All storage drivers must implement these traits to provide a consistent interface.

use super::batch::WriteBatch;
use super::types::StorageResult;
use std::path::Path;

/// Boxed iterator over key-value pairs returned by tree scans
pub type KvIter<'a> = Box<dyn Iterator<Item = StorageResult<(Vec<u8>, Vec<u8>)>> + 'a>;

/// Trait for a tree in the storage driver
///
/// Represents a named, ordered collection of key-value pairs within a storage driver.
/// Similar to a table in SQL databases. Iteration is always in ascending key order.
/// Trees are read-only handles: all mutation goes through `StorageDriver::commit`
/// so that writes spanning several trees stay atomic.
pub trait StorageTree: Send + Sync {
    /// Get a value by key
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>>;

    /// Iterate over all key-value pairs
    fn iter(&self) -> StorageResult<KvIter<'_>>;

    /// Scan with a key prefix, ascending
    fn scan_prefix(&self, prefix: &[u8]) -> StorageResult<KvIter<'_>>;

    /// Scan with a key prefix, descending
    fn scan_prefix_rev(&self, prefix: &[u8]) -> StorageResult<KvIter<'_>>;

    /// Number of entries in the tree
    fn len(&self) -> StorageResult<usize>;
}

/// Main storage driver trait
///
/// Defines the interface that all storage drivers must implement.
pub trait StorageDriver: Send + Sync {
    /// Type of tree used by this driver
    type Tree: StorageTree;

    /// Open or create a storage driver at the given path
    fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self>
    where
        Self: Sized;

    /// Open or create a named tree
    fn open_tree(&self, name: &str) -> StorageResult<Self::Tree>;

    /// Apply a batch atomically: either every operation lands or none does.
    ///
    /// Returns `StorageDriverError::GuardFailed` for the first operation whose
    /// guard does not hold; nothing from the batch is applied in that case.
    fn commit(&self, batch: &WriteBatch) -> StorageResult<()>;

    /// Flush all pending writes to disk
    fn flush(&self) -> StorageResult<()>;

    /// Explicitly close the storage driver and release any file locks
    fn shutdown(&mut self) -> StorageResult<()> {
        self.flush()
    }
}

// Helper implementation for Box<dyn StorageTree>
// This allows us to use boxed trait objects seamlessly
impl StorageTree for Box<dyn StorageTree> {
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn iter(&self) -> StorageResult<KvIter<'_>> {
        (**self).iter()
    }

    fn scan_prefix(&self, prefix: &[u8]) -> StorageResult<KvIter<'_>> {
        (**self).scan_prefix(prefix)
    }

    fn scan_prefix_rev(&self, prefix: &[u8]) -> StorageResult<KvIter<'_>> {
        (**self).scan_prefix_rev(prefix)
    }

    fn len(&self) -> StorageResult<usize> {
        (**self).len()
    }
}
