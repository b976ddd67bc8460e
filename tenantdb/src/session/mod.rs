// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Session management
//!
//! Every store operation runs inside a `Session`: acquired from the
//! `SessionManager` at the start of the operation and released when dropped,
//! on success and error paths alike.

pub mod manager;
pub mod session;

pub use manager::SessionManager;
