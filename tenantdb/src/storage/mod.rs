// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage layer
//!
//! This module provides:
//! - Pluggable key-value drivers with atomic multi-tree commits (`persistent`)
//! - Key encoding for the schema and record tables (`keys`)
//! - Stored envelopes for descriptors and records (`data_adapter`)
//! - The process-wide `StorageManager`

pub(crate) mod data_adapter;
pub(crate) mod keys;
mod persistent;
pub mod storage_manager;

pub use persistent::StorageType;
pub(crate) use persistent::{StorageDriverError, WriteBatch, WriteGuard};
pub use storage_manager::{StorageManager, Table};
