// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema catalog
//!
//! Named descriptors stored in the `schemas` table. A descriptor is metadata
//! only; nothing checks records against it. Deleting a descriptor cascades to
//! every record whose namespace equals its name.

pub mod manager;

pub use manager::SchemaCatalog;
