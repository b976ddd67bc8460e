// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Namespace-scoped records
//!
//! - `RecordRepository`: single-record CRUD with id allocation
//! - `BulkWriter`: all-or-nothing multi-record insert
//! - `allocation`: the `1 + max(id)` rule, evaluated against a transaction

pub mod allocation;
pub mod bulk;
pub mod repository;

pub use bulk::BulkWriter;
pub use repository::RecordRepository;

use crate::error::{StoreError, StoreResult};

pub(crate) fn validate_namespace(namespace: &str) -> StoreResult<()> {
    if namespace.is_empty() {
        return Err(StoreError::Validation(
            "namespace must not be empty".to_string(),
        ));
    }
    Ok(())
}
