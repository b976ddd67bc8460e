// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the document store
//!
//! Domain errors (`Validation`, `DuplicateName`, `DuplicateId`, `NotFound`) are
//! distinct variants so a transport adapter can map them to client-facing
//! statuses. Everything the storage engine throws collapses into `Storage`.

use crate::storage::StorageDriverError;
use crate::types::RecordId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Schema \"{0}\" already exists")]
    DuplicateName(String),

    #[error("ID {id} already exists in {namespace}")]
    DuplicateId { namespace: String, id: RecordId },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    Storage(String),
}

/// Coarse classification of a `StoreError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    DuplicateName,
    DuplicateId,
    NotFound,
    Storage,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Validation(_) => ErrorKind::Validation,
            StoreError::DuplicateName(_) => ErrorKind::DuplicateName,
            StoreError::DuplicateId { .. } => ErrorKind::DuplicateId,
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// True for caller-caused errors; false for engine failures
    pub fn is_domain_error(&self) -> bool {
        self.kind() != ErrorKind::Storage
    }

    pub(crate) fn record_not_found(namespace: &str, id: RecordId) -> Self {
        StoreError::NotFound(format!("record {} not found in {}", id, namespace))
    }
}

impl From<StorageDriverError> for StoreError {
    fn from(err: StorageDriverError) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Storage(format!("JSON codec error: {}", err))
    }
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        StoreError::Storage(format!("Envelope codec error: {}", err))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_separate_domain_from_storage() {
        let dup = StoreError::DuplicateId {
            namespace: "shop1".to_string(),
            id: 3,
        };
        assert_eq!(dup.kind(), ErrorKind::DuplicateId);
        assert!(dup.is_domain_error());
        assert_eq!(dup.to_string(), "ID 3 already exists in shop1");

        let io: StoreError =
            StorageDriverError::BackendSpecific("disk on fire".to_string()).into();
        assert_eq!(io.kind(), ErrorKind::Storage);
        assert!(!io.is_domain_error());
    }
}
