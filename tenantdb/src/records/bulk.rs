// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Bulk writer
//!
//! Inserts a list of record bodies into one namespace inside a single
//! transaction. Ids are allocated one item at a time against the
//! transaction's own staged inserts. Any failing item aborts the whole
//! batch: the transaction is dropped uncommitted and the item's error is
//! returned as is.

use super::repository::insert_one;
use super::validate_namespace;
use crate::config::IdPolicy;
use crate::error::StoreResult;
use crate::session::SessionManager;
use crate::types::Content;
use log::{info, warn};

pub struct BulkWriter<'a> {
    sessions: &'a SessionManager,
    policy: IdPolicy,
}

impl<'a> BulkWriter<'a> {
    pub(crate) fn new(sessions: &'a SessionManager, policy: IdPolicy) -> Self {
        Self { sessions, policy }
    }

    /// Insert every body or none of them; returns the stored bodies in input order
    pub fn create_many(&self, namespace: &str, contents: Vec<Content>) -> StoreResult<Vec<Content>> {
        validate_namespace(namespace)?;
        let total = contents.len();

        let session = self.sessions.write_session(namespace);
        let mut txn = session.begin();
        let mut stored = Vec::with_capacity(total);

        for (index, content) in contents.into_iter().enumerate() {
            match insert_one(&mut txn, namespace, content, self.policy) {
                Ok(content) => stored.push(content),
                Err(e) => {
                    warn!(
                        "Bulk insert into {} failed at item {} of {}: {}",
                        namespace,
                        index + 1,
                        total,
                        e
                    );
                    txn.rollback();
                    return Err(e);
                }
            }
        }

        txn.commit()?;
        info!("Bulk inserted {} record(s) into {}", stored.len(), namespace);
        Ok(stored)
    }
}
