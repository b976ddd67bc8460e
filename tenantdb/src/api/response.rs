// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transport-neutral response and error-to-status mapping

use crate::error::{ErrorKind, StoreError};
use log::error;
use serde_json::{json, Value};

/// Generic body for failures that must not leak engine detail
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    pub fn created(body: Value) -> Self {
        Self::new(201, body)
    }

    pub fn message(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, json!({ "message": message.into() }))
    }

    /// `{"error": message}` with the given status
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, json!({ "error": message.into() }))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::error(400, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::error(404, message)
    }

    /// Map a store error to its status.
    ///
    /// Caller errors carry their message; storage failures are logged in full
    /// and answered with a generic 500.
    pub fn from_error(err: &StoreError) -> Self {
        match err.kind() {
            ErrorKind::Validation | ErrorKind::DuplicateName | ErrorKind::DuplicateId => {
                Self::bad_request(err.to_string())
            }
            ErrorKind::NotFound => Self::not_found(err.to_string()),
            ErrorKind::Storage => {
                error!("Request failed with storage error: {}", err);
                Self::error(500, INTERNAL_ERROR_MESSAGE)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` field of a failure body, if any
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

impl From<StoreError> for ApiResponse {
    fn from(err: StoreError) -> Self {
        Self::from_error(&err)
    }
}
