// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Per-namespace write serialization
//!
//! A fixed set of lock stripes; each namespace hashes onto one stripe. Two
//! writers to the same namespace always contend on the same stripe, so id
//! allocation (read max, then insert) cannot interleave within the process.
//! Unrelated namespaces only contend when they share a stripe.

use parking_lot::{Mutex, MutexGuard};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub struct NamespaceLocks {
    stripes: Vec<Mutex<()>>,
}

impl NamespaceLocks {
    pub fn new(stripe_count: usize) -> Self {
        let stripes = (0..stripe_count.max(1)).map(|_| Mutex::new(())).collect();
        Self { stripes }
    }

    /// Stripe index for `namespace`
    pub fn stripe_for(&self, namespace: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        namespace.hash(&mut hasher);
        (hasher.finish() % self.stripes.len() as u64) as usize
    }

    /// Block until the namespace's stripe is held
    pub fn lock(&self, namespace: &str) -> MutexGuard<'_, ()> {
        self.stripes[self.stripe_for(namespace)].lock()
    }

    /// Hold every stripe, acquired in index order
    pub fn lock_all(&self) -> Vec<MutexGuard<'_, ()>> {
        self.stripes.iter().map(|stripe| stripe.lock()).collect()
    }
}
