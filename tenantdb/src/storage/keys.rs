// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Key layout for the `schemas` and `records` trees
//!
//! Schema keys are the raw name bytes, so tree order is ascending name order.
//! Record keys are `len(namespace) as u32 BE ++ namespace ++ id`, where the id
//! is an i64 with its sign bit flipped and written big-endian. The length
//! prefix keeps one namespace from being a key-prefix of another, and the id
//! encoding makes byte order equal numeric order, so a prefix scan over a
//! namespace yields records by ascending id.

use crate::types::RecordId;

const LEN_PREFIX: usize = 4;
const ID_LEN: usize = 8;
const SIGN_BIT: u64 = 1 << 63;

pub fn schema_key(name: &str) -> Vec<u8> {
    name.as_bytes().to_vec()
}

pub fn decode_schema_key(key: &[u8]) -> Option<String> {
    String::from_utf8(key.to_vec()).ok()
}

/// Prefix shared by every record key of `namespace`
pub fn namespace_prefix(namespace: &str) -> Vec<u8> {
    let bytes = namespace.as_bytes();
    let mut prefix = Vec::with_capacity(LEN_PREFIX + bytes.len() + ID_LEN);
    prefix.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    prefix.extend_from_slice(bytes);
    prefix
}

pub fn record_key(namespace: &str, id: RecordId) -> Vec<u8> {
    let mut key = namespace_prefix(namespace);
    key.extend_from_slice(&encode_id(id));
    key
}

/// Split a record key back into `(namespace, id)`; `None` if malformed
pub fn decode_record_key(key: &[u8]) -> Option<(String, RecordId)> {
    if key.len() < LEN_PREFIX + ID_LEN {
        return None;
    }
    let mut len_bytes = [0u8; LEN_PREFIX];
    len_bytes.copy_from_slice(&key[..LEN_PREFIX]);
    let ns_len = u32::from_be_bytes(len_bytes) as usize;
    if key.len() != LEN_PREFIX + ns_len + ID_LEN {
        return None;
    }
    let namespace = std::str::from_utf8(&key[LEN_PREFIX..LEN_PREFIX + ns_len]).ok()?;
    let mut id_bytes = [0u8; ID_LEN];
    id_bytes.copy_from_slice(&key[LEN_PREFIX + ns_len..]);
    Some((namespace.to_string(), decode_id(id_bytes)))
}

fn encode_id(id: RecordId) -> [u8; ID_LEN] {
    ((id as u64) ^ SIGN_BIT).to_be_bytes()
}

fn decode_id(bytes: [u8; ID_LEN]) -> RecordId {
    (u64::from_be_bytes(bytes) ^ SIGN_BIT) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keys_sort_numerically() {
        let ids = [i64::MIN, -10, -1, 0, 1, 2, 10, 255, 256, i64::MAX];
        let keys: Vec<Vec<u8>> = ids.iter().map(|id| record_key("shop", *id)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_record_key_round_trips_edge_values() {
        for (ns, id) in [("shop1", 1), ("", -7), ("ñandú", i64::MAX), ("a\0b", i64::MIN)] {
            let key = record_key(ns, id);
            assert_eq!(decode_record_key(&key), Some((ns.to_string(), id)));
            assert!(key.starts_with(&namespace_prefix(ns)));
        }
    }

    #[test]
    fn test_namespace_prefixes_do_not_nest() {
        let short = record_key("a", 1);
        assert!(!short.starts_with(&namespace_prefix("ab")));
        let long = record_key("ab", 1);
        assert!(!long.starts_with(&namespace_prefix("a")));
    }

    #[test]
    fn test_malformed_keys() {
        assert_eq!(decode_record_key(b"short"), None);
        let mut key = record_key("shop", 1);
        key.push(0);
        assert_eq!(decode_record_key(&key), None);
    }
}
