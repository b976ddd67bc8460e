// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Value types shared by the catalog, repositories and the API layer

pub mod document;
pub mod models;

pub use document::{Content, RecordId, ID_FIELD};
pub use models::{SchemaDescriptor, StoreStats};
