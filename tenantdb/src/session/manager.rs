// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Session manager
//!
//! Owns the process-wide `StorageManager` and the namespace lock stripes, and
//! hands out scoped sessions over them.

use super::session::{Session, SessionMode};
use crate::storage::StorageManager;
use crate::txn::NamespaceLocks;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct SessionManager {
    storage: StorageManager,
    locks: NamespaceLocks,
    next_session: AtomicU64,
}

impl SessionManager {
    pub fn new(storage: StorageManager, lock_stripes: usize) -> Self {
        Self {
            storage,
            locks: NamespaceLocks::new(lock_stripes),
            next_session: AtomicU64::new(1),
        }
    }

    /// Session for pure reads; takes no lock
    pub fn read_session(&self) -> Session<'_> {
        Session::acquire(self.next_id(), SessionMode::Read, &self.storage, Vec::new())
    }

    /// Session holding the serialization point of `namespace`
    pub fn write_session(&self, namespace: &str) -> Session<'_> {
        let guard = self.locks.lock(namespace);
        Session::acquire(
            self.next_id(),
            SessionMode::Write(namespace.to_string()),
            &self.storage,
            vec![guard],
        )
    }

    /// Session holding every namespace's serialization point
    pub fn exclusive_session(&self) -> Session<'_> {
        let guards = self.locks.lock_all();
        Session::acquire(self.next_id(), SessionMode::Exclusive, &self.storage, guards)
    }

    pub fn storage(&self) -> &StorageManager {
        &self.storage
    }

    fn next_id(&self) -> u64 {
        self.next_session.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StorageType, Table};
    use std::sync::Arc;
    use std::time::Duration;

    fn manager() -> SessionManager {
        let storage = StorageManager::new("", StorageType::Memory, false).unwrap();
        SessionManager::new(storage, 8)
    }

    #[test]
    fn test_session_ids_increase() {
        let manager = manager();
        let a = manager.next_id();
        let b = manager.next_id();
        assert!(b > a);
    }

    #[test]
    fn test_write_sessions_on_one_namespace_serialize() {
        let manager = Arc::new(manager());
        let held = manager.write_session("shop1");

        let other = Arc::clone(&manager);
        let handle = std::thread::spawn(move || {
            let _session = other.write_session("shop1");
        });

        std::thread::sleep(Duration::from_millis(50));
        assert!(!handle.is_finished());
        drop(held);
        handle.join().unwrap();
    }

    #[test]
    fn test_read_sessions_do_not_block_on_writers() {
        let manager = manager();
        let _writer = manager.write_session("shop1");
        let reader = manager.read_session();
        assert_eq!(reader.storage().tree(Table::Schemas).len().unwrap(), 0);
    }
}
