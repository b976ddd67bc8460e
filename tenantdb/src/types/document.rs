// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema-less document bodies
//!
//! Record content, schema config and schema fields are opaque JSON values. The
//! store only ever looks at the top-level `id` key of a record body; everything
//! else is carried through a canonical encode/decode pair untouched.

use crate::config::IdPolicy;
use crate::error::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A record body: a JSON object
pub type Content = serde_json::Map<String, Value>;

/// Record identity, unique within a namespace
pub type RecordId = i64;

/// Key of the identity field inside a record body
pub const ID_FIELD: &str = "id";

/// Canonical text form of a value (compact JSON, object keys sorted)
pub fn encode_value<T: Serialize + ?Sized>(value: &T) -> StoreResult<String> {
    Ok(serde_json::to_string(value)?)
}

/// Inverse of `encode_value`
pub fn decode_value<T: DeserializeOwned>(text: &str) -> StoreResult<T> {
    Ok(serde_json::from_str(text)?)
}

/// JSON truthiness: null, false, zero, and empty strings/arrays/objects are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// The id the caller supplied in a record body, if any, under `policy`.
///
/// A supplied id must be an integer that fits in an i64.
pub fn supplied_id(content: &Content, policy: IdPolicy) -> StoreResult<Option<RecordId>> {
    let value = match content.get(ID_FIELD) {
        Some(value) => value,
        None => return Ok(None),
    };

    if policy == IdPolicy::Truthy && !is_truthy(value) {
        return Ok(None);
    }

    value.as_i64().map(Some).ok_or_else(|| {
        StoreError::Validation(format!("record id must be an integer, got {}", value))
    })
}

/// Overwrite the body's `id` with `id`
pub fn inject_id(content: &mut Content, id: RecordId) {
    content.insert(ID_FIELD.to_string(), Value::from(id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Content {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{} should be falsy", falsy);
        }
        for truthy in [json!(true), json!(-1), json!(0.5), json!("0"), json!([0]), json!({"a": 1})] {
            assert!(is_truthy(&truthy), "{} should be truthy", truthy);
        }
    }

    #[test]
    fn test_zero_id_under_each_policy() {
        let content = body(json!({"id": 0, "name": "zero"}));
        assert_eq!(supplied_id(&content, IdPolicy::Truthy).unwrap(), None);
        assert_eq!(supplied_id(&content, IdPolicy::Present).unwrap(), Some(0));
    }

    #[test]
    fn test_missing_and_explicit_ids() {
        let missing = body(json!({"name": "a"}));
        assert_eq!(supplied_id(&missing, IdPolicy::Truthy).unwrap(), None);
        assert_eq!(supplied_id(&missing, IdPolicy::Present).unwrap(), None);

        let explicit = body(json!({"id": 42}));
        assert_eq!(supplied_id(&explicit, IdPolicy::Truthy).unwrap(), Some(42));
    }

    #[test]
    fn test_non_integer_ids_are_rejected() {
        for bad in [json!("abc"), json!(2.5), json!(true)] {
            let content = body(json!({ "id": bad }));
            let err = supplied_id(&content, IdPolicy::Truthy).unwrap_err();
            assert!(matches!(err, StoreError::Validation(_)));
        }

        let null_id = body(json!({"id": null}));
        assert_eq!(supplied_id(&null_id, IdPolicy::Truthy).unwrap(), None);
        assert!(supplied_id(&null_id, IdPolicy::Present).is_err());
    }

    #[test]
    fn test_canonical_encoding_sorts_keys() {
        let content = body(json!({"name": "Widget", "id": 1}));
        assert_eq!(encode_value(&content).unwrap(), r#"{"id":1,"name":"Widget"}"#);

        let decoded: Content = decode_value(r#"{"id":1,"name":"Widget"}"#).unwrap();
        assert_eq!(decoded, content);
    }

    #[test]
    fn test_inject_id_overwrites() {
        let mut content = body(json!({"id": 99, "name": "x"}));
        inject_id(&mut content, 7);
        assert_eq!(content.get(ID_FIELD), Some(&json!(7)));
    }
}
