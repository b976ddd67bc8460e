// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Atomic write batches
//!
//! A `WriteBatch` is an ordered list of puts and removes spanning any number of
//! trees. Drivers apply it all-or-nothing. Guards are evaluated in batch order,
//! so a guard sees the effect of earlier operations in the same batch.

/// Precondition checked against a key at commit time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteGuard {
    /// No precondition
    None,
    /// Key must not exist (insert)
    MustBeAbsent,
    /// Key must already exist (update)
    MustExist,
}

impl WriteGuard {
    /// Whether the guard admits a key that is (or is not) present
    pub fn admits(&self, present: bool) -> bool {
        match self {
            WriteGuard::None => true,
            WriteGuard::MustBeAbsent => !present,
            WriteGuard::MustExist => present,
        }
    }
}

/// A single operation in a write batch
#[derive(Debug, Clone)]
pub enum WriteOp {
    Put {
        tree: String,
        key: Vec<u8>,
        value: Vec<u8>,
        guard: WriteGuard,
    },
    Remove {
        tree: String,
        key: Vec<u8>,
        guard: WriteGuard,
    },
}

impl WriteOp {
    pub fn tree(&self) -> &str {
        match self {
            WriteOp::Put { tree, .. } | WriteOp::Remove { tree, .. } => tree,
        }
    }

    pub fn key(&self) -> &[u8] {
        match self {
            WriteOp::Put { key, .. } | WriteOp::Remove { key, .. } => key,
        }
    }

    pub fn guard(&self) -> WriteGuard {
        match self {
            WriteOp::Put { guard, .. } | WriteOp::Remove { guard, .. } => *guard,
        }
    }
}

/// Ordered multi-tree batch applied atomically by `StorageDriver::commit`
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn put(&mut self, tree: &str, key: Vec<u8>, value: Vec<u8>, guard: WriteGuard) {
        self.ops.push(WriteOp::Put {
            tree: tree.to_string(),
            key,
            value,
            guard,
        });
    }

    pub fn remove(&mut self, tree: &str, key: Vec<u8>, guard: WriteGuard) {
        self.ops.push(WriteOp::Remove {
            tree: tree.to_string(),
            key,
            guard,
        });
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Distinct tree names touched by this batch, in first-use order
    pub fn tree_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for op in &self.ops {
            if !names.contains(&op.tree()) {
                names.push(op.tree());
            }
        }
        names
    }
}
