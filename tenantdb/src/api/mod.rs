// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Request/response contract for transport adapters
//!
//! An HTTP server (or any other transport) turns an inbound request into an
//! `ApiRequest`, calls `Router::handle`, and writes the returned status and
//! JSON body back out. Routes, bodies and status codes follow the existing
//! REST surface:
//!
//! - `GET|POST /schemas`, `GET|DELETE /schemas/{name}`
//! - `GET|POST /data?negocio=X`, `GET|PUT|DELETE /data/{id}?negocio=X`
//! - `GET /stats`, `GET /health`, `GET /`
//!
//! Every path may also be given with an `/api` prefix.

pub mod request;
pub mod response;
pub mod router;

pub use request::{ApiRequest, Method};
pub use response::ApiResponse;
pub use router::Router;

/// Query parameter that carries the namespace
pub const NAMESPACE_PARAM: &str = "negocio";
