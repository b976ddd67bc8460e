// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Data adapter - serialization of catalog entries and records for storage
//!
//! Tree values are bincode envelopes. The user-supplied parts (record content,
//! schema config and fields) sit inside the envelope as canonical JSON text.

use crate::error::StoreResult;
use crate::types::document::{decode_value, encode_value};
use crate::types::{Content, RecordId, SchemaDescriptor};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored form of a schema descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredSchema {
    pub name: String,
    pub config: String,
    pub fields: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredSchema {
    pub fn from_descriptor(descriptor: &SchemaDescriptor) -> StoreResult<Self> {
        Ok(Self {
            name: descriptor.name.clone(),
            config: encode_value(&descriptor.config)?,
            fields: encode_value(&descriptor.fields)?,
            created_at: descriptor.created_at,
            updated_at: descriptor.updated_at,
        })
    }

    pub fn to_descriptor(&self) -> StoreResult<SchemaDescriptor> {
        Ok(SchemaDescriptor {
            name: self.name.clone(),
            config: decode_value(&self.config)?,
            fields: decode_value(&self.fields)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    pub fn to_bytes(&self) -> StoreResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> StoreResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Stored form of a record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredRecord {
    pub namespace: String,
    pub record_id: RecordId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredRecord {
    pub fn new(
        namespace: &str,
        record_id: RecordId,
        content: &Content,
        now: DateTime<Utc>,
    ) -> StoreResult<Self> {
        Ok(Self {
            namespace: namespace.to_string(),
            record_id,
            content: encode_value(content)?,
            created_at: now,
            updated_at: now,
        })
    }

    /// Same record with a new body; `created_at` is kept
    pub fn revise(&self, content: &Content, now: DateTime<Utc>) -> StoreResult<Self> {
        Ok(Self {
            namespace: self.namespace.clone(),
            record_id: self.record_id,
            content: encode_value(content)?,
            created_at: self.created_at,
            updated_at: now,
        })
    }

    pub fn content(&self) -> StoreResult<Content> {
        decode_value(&self.content)
    }

    pub fn to_bytes(&self) -> StoreResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> StoreResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
