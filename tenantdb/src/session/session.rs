// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! A scoped session over the storage manager

use crate::storage::StorageManager;
use crate::txn::WriteTxn;
use log::trace;
use parking_lot::MutexGuard;
use std::time::Instant;

/// What a session is allowed to serialize against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    Read,
    Write(String),
    Exclusive,
}

pub struct Session<'a> {
    id: u64,
    mode: SessionMode,
    storage: &'a StorageManager,
    opened_at: Instant,
    _guards: Vec<MutexGuard<'a, ()>>,
}

impl<'a> Session<'a> {
    pub(crate) fn acquire(
        id: u64,
        mode: SessionMode,
        storage: &'a StorageManager,
        guards: Vec<MutexGuard<'a, ()>>,
    ) -> Self {
        trace!("session {} acquired ({:?})", id, mode);
        Self {
            id,
            mode,
            storage,
            opened_at: Instant::now(),
            _guards: guards,
        }
    }

    pub fn storage(&self) -> &'a StorageManager {
        self.storage
    }

    /// Start a write transaction bound to this session
    pub fn begin(&self) -> WriteTxn<'_> {
        WriteTxn::begin(self.storage)
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        trace!(
            "session {} ({:?}) released after {:?}",
            self.id,
            self.mode,
            self.opened_at.elapsed()
        );
    }
}
