// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Stats aggregator
//!
//! Counts over both tables, recomputed on every call. Per-namespace counts
//! and the record total come from one pass over the records table, so they
//! always agree with each other.

use crate::error::{StoreError, StoreResult};
use crate::session::SessionManager;
use crate::storage::{keys, Table};
use crate::types::StoreStats;

pub struct StatsAggregator<'a> {
    sessions: &'a SessionManager,
}

impl<'a> StatsAggregator<'a> {
    pub(crate) fn new(sessions: &'a SessionManager) -> Self {
        Self { sessions }
    }

    pub fn stats(&self) -> StoreResult<StoreStats> {
        let session = self.sessions.read_session();
        let storage = session.storage();

        let mut stats = StoreStats {
            total_schemas: storage.tree(Table::Schemas).len()? as u64,
            ..StoreStats::default()
        };

        for item in storage.tree(Table::Records).iter()? {
            let (key, _) = item?;
            let (namespace, _) = keys::decode_record_key(&key)
                .ok_or_else(|| StoreError::Storage("malformed record key".to_string()))?;
            *stats.records_by_namespace.entry(namespace).or_insert(0) += 1;
            stats.total_records += 1;
        }

        Ok(stats)
    }
}
