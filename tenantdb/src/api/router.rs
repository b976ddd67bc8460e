// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Request router
//!
//! Resolves an `ApiRequest` to exactly one store operation and shapes the
//! result into the wire format existing callers expect.

use super::request::{path_decode, ApiRequest, Method};
use super::response::ApiResponse;
use super::NAMESPACE_PARAM;
use crate::coordinator::TenantStore;
use crate::types::document::is_truthy;
use crate::types::{Content, RecordId};
use log::debug;
use serde_json::{json, Value};
use std::sync::Arc;

const API_PREFIX: &str = "/api";

/// Resolved route; path parameters already decoded
#[derive(Debug, Clone, PartialEq)]
enum Route {
    Index,
    Health,
    Stats,
    Schemas,
    Schema(String),
    Records,
    Record(RecordId),
}

impl Route {
    fn resolve(path: &str) -> Option<Route> {
        let path = match path.strip_prefix(API_PREFIX) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::Index),
            ["health"] => Some(Route::Health),
            ["stats"] => Some(Route::Stats),
            ["schemas"] => Some(Route::Schemas),
            ["schemas", name] => Some(Route::Schema(path_decode(name))),
            ["data"] => Some(Route::Records),
            ["data", id] => id.parse().ok().map(Route::Record),
            _ => None,
        }
    }
}

pub struct Router {
    store: Arc<TenantStore>,
}

impl Router {
    pub fn new(store: Arc<TenantStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<TenantStore> {
        &self.store
    }

    pub fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let response = match Route::resolve(&request.path) {
            Some(route) => self.dispatch(route, request),
            None => ApiResponse::not_found("endpoint not found"),
        };
        debug!(
            "{} {} -> {}",
            request.method, request.path, response.status
        );
        response
    }

    fn dispatch(&self, route: Route, request: &ApiRequest) -> ApiResponse {
        let method = request.method;
        match (route, method) {
            (Route::Index, Method::Get) => index(),
            (Route::Health, Method::Get) => health(),
            (Route::Stats, Method::Get) => self.stats(),
            (Route::Schemas, Method::Get) => self.list_schemas(),
            (Route::Schemas, Method::Post) => self.create_schema(request.body.as_ref()),
            (Route::Schema(name), Method::Get) => self.get_schema(&name),
            (Route::Schema(name), Method::Delete) => self.delete_schema(&name),
            (Route::Records, Method::Get) => self.with_namespace(request, |ns| self.list_records(ns)),
            (Route::Records, Method::Post) => {
                self.with_namespace(request, |ns| self.create_records(ns, request.body.as_ref()))
            }
            (Route::Record(id), Method::Get) => {
                self.with_namespace(request, |ns| self.get_record(ns, id))
            }
            (Route::Record(id), Method::Put) => {
                self.with_namespace(request, |ns| self.update_record(ns, id, request.body.as_ref()))
            }
            (Route::Record(id), Method::Delete) => {
                self.with_namespace(request, |ns| self.delete_record(ns, id))
            }
            _ => ApiResponse::error(405, format!("method {} not allowed", method)),
        }
    }

    fn with_namespace<F>(&self, request: &ApiRequest, handler: F) -> ApiResponse
    where
        F: FnOnce(&str) -> ApiResponse,
    {
        match request.param(NAMESPACE_PARAM) {
            Some(namespace) if !namespace.is_empty() => handler(namespace),
            _ => ApiResponse::bad_request(format!(
                "parameter \"{}\" is required",
                NAMESPACE_PARAM
            )),
        }
    }

    fn stats(&self) -> ApiResponse {
        match self.store.stats() {
            Ok(stats) => ApiResponse::ok(json!(stats)),
            Err(e) => e.into(),
        }
    }

    fn list_schemas(&self) -> ApiResponse {
        match self.store.list_schemas() {
            Ok(descriptors) => ApiResponse::ok(Value::Array(
                descriptors.iter().map(|d| d.to_wire()).collect(),
            )),
            Err(e) => e.into(),
        }
    }

    fn get_schema(&self, name: &str) -> ApiResponse {
        match self.store.get_schema(name) {
            Ok(Some(descriptor)) => ApiResponse::ok(descriptor.to_wire()),
            Ok(None) => ApiResponse::not_found("schema not found"),
            Err(e) => e.into(),
        }
    }

    fn create_schema(&self, body: Option<&Value>) -> ApiResponse {
        let (name, config, fields) = match parse_schema_body(body) {
            Ok(parts) => parts,
            Err(response) => return response,
        };
        match self.store.create_schema(&name, config, fields) {
            Ok(descriptor) => ApiResponse::created(descriptor.to_wire()),
            Err(e) => e.into(),
        }
    }

    fn delete_schema(&self, name: &str) -> ApiResponse {
        match self.store.delete_schema(name) {
            Ok(true) => ApiResponse::message(200, "schema deleted"),
            Ok(false) => ApiResponse::not_found("schema not found"),
            Err(e) => e.into(),
        }
    }

    fn list_records(&self, namespace: &str) -> ApiResponse {
        match self.store.list_records(namespace) {
            Ok(contents) => ApiResponse::ok(Value::Array(
                contents.into_iter().map(Value::Object).collect(),
            )),
            Err(e) => e.into(),
        }
    }

    fn get_record(&self, namespace: &str, id: RecordId) -> ApiResponse {
        match self.store.get_record(namespace, id) {
            Ok(Some(content)) => ApiResponse::ok(Value::Object(content)),
            Ok(None) => ApiResponse::not_found("record not found"),
            Err(e) => e.into(),
        }
    }

    fn create_records(&self, namespace: &str, body: Option<&Value>) -> ApiResponse {
        match body {
            Some(value) if is_truthy(value) => match value {
                Value::Object(content) => {
                    match self.store.create_record(namespace, content.clone()) {
                        Ok(stored) => ApiResponse::created(Value::Object(stored)),
                        Err(e) => e.into(),
                    }
                }
                Value::Array(items) => self.create_bulk(namespace, items),
                _ => ApiResponse::bad_request("body must be an object or an array of objects"),
            },
            _ => ApiResponse::bad_request("no data received"),
        }
    }

    fn create_bulk(&self, namespace: &str, items: &[Value]) -> ApiResponse {
        let mut contents = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::Object(content) => contents.push(content.clone()),
                _ => {
                    return ApiResponse::bad_request(format!(
                        "item {} is not an object",
                        index + 1
                    ))
                }
            }
        }

        match self.store.create_records(namespace, contents) {
            Ok(stored) => ApiResponse::created(json!({
                "message": format!("{} record(s) created", stored.len()),
                "data": stored.into_iter().map(Value::Object).collect::<Vec<_>>(),
            })),
            Err(e) => e.into(),
        }
    }

    fn update_record(&self, namespace: &str, id: RecordId, body: Option<&Value>) -> ApiResponse {
        let content = match body {
            Some(Value::Object(content)) if !content.is_empty() => content.clone(),
            Some(value) if is_truthy(value) => {
                return ApiResponse::bad_request("body must be an object")
            }
            _ => return ApiResponse::bad_request("no data received"),
        };
        match self.store.update_record(namespace, id, content) {
            Ok(stored) => ApiResponse::ok(Value::Object(stored)),
            Err(e) => e.into(),
        }
    }

    fn delete_record(&self, namespace: &str, id: RecordId) -> ApiResponse {
        match self.store.delete_record(namespace, id) {
            Ok(true) => ApiResponse::message(200, "record deleted"),
            Ok(false) => ApiResponse::not_found("record not found"),
            Err(e) => e.into(),
        }
    }
}

/// Pull `name`, `config` and `campos` out of a create-schema body
fn parse_schema_body(body: Option<&Value>) -> Result<(String, Content, Vec<Value>), ApiResponse> {
    let object = match body {
        Some(Value::Object(object)) if object.contains_key("name") && object.contains_key("campos") => object,
        _ => return Err(ApiResponse::bad_request("missing required fields: name, campos")),
    };

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiResponse::bad_request("\"name\" must be a string"))?
        .to_string();

    let fields = match object.get("campos") {
        Some(Value::Array(fields)) => fields.clone(),
        _ => return Err(ApiResponse::bad_request("\"campos\" must be an array")),
    };

    let config = match object.get("config") {
        None | Some(Value::Null) => Content::new(),
        Some(Value::Object(config)) => config.clone(),
        Some(_) => return Err(ApiResponse::bad_request("\"config\" must be an object")),
    };

    Ok((name, config, fields))
}

fn index() -> ApiResponse {
    ApiResponse::ok(json!({
        "message": "TenantDB API",
        "version": crate::VERSION,
        "endpoints": {
            "schemas": {
                "GET /api/schemas": "list schemas",
                "GET /api/schemas/<name>": "get a schema",
                "POST /api/schemas": "create a schema",
                "DELETE /api/schemas/<name>": "delete a schema and its records",
            },
            "data": {
                "GET /api/data?negocio=X": "list records of a namespace",
                "GET /api/data/<id>?negocio=X": "get a record",
                "POST /api/data?negocio=X": "create record(s) [object or array]",
                "PUT /api/data/<id>?negocio=X": "update a record",
                "DELETE /api/data/<id>?negocio=X": "delete a record",
            },
            "utils": {
                "GET /api/health": "health check",
                "GET /api/stats": "statistics",
            },
        },
    }))
}

fn health() -> ApiResponse {
    ApiResponse::ok(json!({
        "status": "ok",
        "message": "server is running",
    }))
}
