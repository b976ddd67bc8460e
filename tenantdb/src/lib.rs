// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! TenantDB - a multi-tenant, schema-catalogued document store
//!
//! TenantDB persists schema-less JSON records partitioned by namespace, next
//! to a catalog of named schema descriptors that serve as metadata.
//!
//! # Features
//!
//! - **Per-namespace ids**: records without an id get `1 + max(id)` of their namespace
//! - **Atomic bulk writes**: a whole batch commits or nothing does
//! - **Cascading schema delete**: descriptor and namespace records go together
//! - **Embedded storage**: Sled on disk, or an in-memory backend for tests
//! - **Transport contract**: `api::Router` maps REST-style requests to store calls
//!
//! # Usage
//!
//! ```no_run
//! use tenantdb::{StoreConfig, TenantStore};
//!
//! let store = TenantStore::open(StoreConfig::new("./tenant_data"))?;
//! let stats = store.stats()?;
//! println!("{} schema(s), {} record(s)", stats.total_schemas, stats.total_records);
//! # Ok::<(), tenantdb::StoreError>(())
//! ```

// Public modules - exposed to external users
pub mod api;
pub mod config;
pub mod coordinator;
pub mod error;

// Internal modules - only visible within tenantdb crate
pub(crate) mod catalog;
pub(crate) mod records;
pub(crate) mod session;
pub(crate) mod stats;
pub(crate) mod storage;
pub(crate) mod txn;
pub(crate) mod types;

pub use api::{ApiRequest, ApiResponse, Method, Router};
pub use catalog::SchemaCatalog;
pub use config::{IdPolicy, StoreConfig};
pub use coordinator::TenantStore;
pub use error::{ErrorKind, StoreError, StoreResult};
pub use records::{BulkWriter, RecordRepository};
pub use stats::StatsAggregator;
pub use storage::StorageType;
pub use types::{Content, RecordId, SchemaDescriptor, StoreStats, ID_FIELD};

/// TenantDB version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// TenantDB crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
