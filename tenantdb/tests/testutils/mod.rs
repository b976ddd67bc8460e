//! Test utilities for TenantDB integration tests
//!
//! `TestFixture` opens an isolated store (sled in a temp dir, or in memory)
//! through the public `TenantStore` API only.

#![allow(dead_code)]

pub mod test_fixture;
