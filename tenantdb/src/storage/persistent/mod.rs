// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Persistent storage backends
//!
//! This module provides trait-based abstractions for key-value storage,
//! allowing different storage backends (Sled, in-memory) to be used interchangeably.
//!
//! # Architecture
//!
//! ```text
//! WriteTxn / repositories (application data structures)
//!     ↓
//! StorageManager (schemas + records trees)
//!     ↓
//! StorageDriver (key-value abstraction, atomic WriteBatch commit)
//!     ↓
//! Concrete Implementations (Sled, Memory)
//! ```

pub mod batch;
pub mod factory;
pub mod traits;
pub mod types;

// Driver implementations
pub mod memory;
#[cfg(feature = "sled-backend")]
pub mod sled;

pub use batch::{WriteBatch, WriteGuard};
pub use factory::{create_storage_driver, BoxedDriver};
pub use traits::StorageTree;
pub use types::{StorageDriverError, StorageResult, StorageType};
