// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Record id allocation
//!
//! The next id of a namespace is one more than the greatest id the
//! transaction can see, or 1 for an empty namespace. Because the transaction
//! sees its own staged inserts, consecutive allocations inside one bulk write
//! come out as 1, 2, 3, ... without anything committed in between.

use crate::error::{StoreError, StoreResult};
use crate::storage::{keys, Table};
use crate::txn::WriteTxn;
use crate::types::RecordId;

pub fn next_record_id(txn: &WriteTxn<'_>, namespace: &str) -> StoreResult<RecordId> {
    let prefix = keys::namespace_prefix(namespace);
    let last = match txn.last_key_with_prefix(Table::Records, &prefix)? {
        Some(key) => key,
        None => return Ok(1),
    };

    let (_, max_id) = keys::decode_record_key(&last).ok_or_else(|| {
        StoreError::Storage(format!("malformed record key in namespace {}", namespace))
    })?;

    // A namespace holding only negative ids still continues from its max
    max_id.checked_add(1).ok_or_else(|| {
        StoreError::Validation(format!("record id space exhausted in {}", namespace))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StorageManager, StorageType};

    #[test]
    fn test_empty_namespace_starts_at_one() {
        let storage = StorageManager::new("", StorageType::Memory, false).unwrap();
        let txn = WriteTxn::begin(&storage);
        assert_eq!(next_record_id(&txn, "shop1").unwrap(), 1);
    }

    #[test]
    fn test_allocation_follows_staged_max() {
        let storage = StorageManager::new("", StorageType::Memory, false).unwrap();
        let mut txn = WriteTxn::begin(&storage);
        txn.insert_new(Table::Records, keys::record_key("shop1", 41), Vec::new())
            .unwrap();
        txn.insert_new(Table::Records, keys::record_key("shop10", 99), Vec::new())
            .unwrap();
        assert_eq!(next_record_id(&txn, "shop1").unwrap(), 42);
        assert_eq!(next_record_id(&txn, "shop10").unwrap(), 100);
        assert_eq!(next_record_id(&txn, "shop").unwrap(), 1);
    }

    #[test]
    fn test_exhausted_id_space_is_an_error() {
        let storage = StorageManager::new("", StorageType::Memory, false).unwrap();
        let mut txn = WriteTxn::begin(&storage);
        txn.insert_new(Table::Records, keys::record_key("ns", i64::MAX), Vec::new())
            .unwrap();
        assert!(matches!(
            next_record_id(&txn, "ns"),
            Err(StoreError::Validation(_))
        ));
    }
}
