// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog and aggregate models

use super::document::Content;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// A named schema descriptor. Pure metadata: never checked against records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescriptor {
    pub name: String,

    /// Opaque configuration mapping
    pub config: Content,

    /// Opaque field list
    #[serde(rename = "campos")]
    pub fields: Vec<Value>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SchemaDescriptor {
    /// Wire shape `{name, config, campos}` used by API callers
    pub fn to_wire(&self) -> Value {
        json!({
            "name": self.name,
            "config": self.config,
            "campos": self.fields,
        })
    }
}

/// Counts over both tables, computed at query time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_schemas: u64,
    pub total_records: u64,
    pub records_by_namespace: BTreeMap<String, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_wire_shape() {
        let now = Utc::now();
        let descriptor = SchemaDescriptor {
            name: "shop1".to_string(),
            config: Content::new(),
            fields: vec![json!({"field": "name"})],
            created_at: now,
            updated_at: now,
        };
        assert_eq!(
            descriptor.to_wire(),
            json!({"name": "shop1", "config": {}, "campos": [{"field": "name"}]})
        );
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let mut stats = StoreStats::default();
        stats.total_records = 2;
        stats.records_by_namespace.insert("shop1".to_string(), 2);
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            json!({"totalSchemas": 0, "totalRecords": 2, "recordsByNamespace": {"shop1": 2}})
        );
    }
}
