// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for TenantDB
//!
//! Schema and record management, stats, and raw requests against the
//! router, all run directly on a local database directory.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{handle_record, handle_request, handle_reset, handle_schema, handle_stats};
