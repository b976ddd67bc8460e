// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transaction management
//!
//! - `WriteTxn`: scoped transaction with read-your-own-writes and rollback on drop
//! - `NamespaceLocks`: per-namespace serialization point for writers
//! - `TransactionId`: identity used to correlate log lines

pub mod lock;
pub mod state;
pub mod transaction;

pub use lock::NamespaceLocks;
pub use transaction::WriteTxn;
