// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Tenant Store - the service context for the document store
//!
//! `TenantStore` is built once at startup and shared by `Arc` with whatever
//! serves requests. It owns the storage handle and the session manager and
//! hands out the catalog, repository, bulk and stats views.

pub mod store;

pub use store::TenantStore;
