// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transport-neutral request

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            other => Err(format!("unsupported method: {}", other)),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Decoded path without the query string
    pub path: String,
    pub query: HashMap<String, String>,
    /// Parsed JSON body; `None` when the request had none
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Build a request from a method and a raw target such as `/api/data/3?negocio=shop1`
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (target, HashMap::new()),
        };
        Self {
            method,
            path: path.to_string(),
            query,
            body: None,
        }
    }

    pub fn get(target: &str) -> Self {
        Self::new(Method::Get, target)
    }

    pub fn post(target: &str) -> Self {
        Self::new(Method::Post, target)
    }

    pub fn put(target: &str) -> Self {
        Self::new(Method::Put, target)
    }

    pub fn delete(target: &str) -> Self {
        Self::new(Method::Delete, target)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

/// `a=1&b=two%20words`; the first occurrence of a repeated name wins
fn parse_query(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (name, value) = match pair.split_once('=') {
            Some((k, v)) => (form_decode(k), form_decode(v)),
            None => (form_decode(pair), String::new()),
        };
        params.entry(name).or_insert(value);
    }
    params
}

/// Query component decoding: `%XX` escapes and `+` as space
pub(crate) fn form_decode(input: &str) -> String {
    decode(input, true)
}

/// Path segment decoding: `%XX` escapes only, `+` is literal
pub(crate) fn path_decode(input: &str) -> String {
    decode(input, false)
}

/// Malformed escapes are kept literally
fn decode(input: &str, plus_as_space: bool) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi << 4) | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_splits_path_and_query() {
        let req = ApiRequest::get("/api/data/3?negocio=shop%201&x");
        assert_eq!(req.path, "/api/data/3");
        assert_eq!(req.param("negocio"), Some("shop 1"));
        assert_eq!(req.param("x"), Some(""));
        assert_eq!(req.param("y"), None);
    }

    #[test]
    fn test_form_decode_edge_cases() {
        assert_eq!(form_decode("a+b"), "a b");
        assert_eq!(form_decode("caf%C3%A9"), "café");
        assert_eq!(form_decode("100%"), "100%");
        assert_eq!(form_decode("%zz"), "%zz");
    }

    #[test]
    fn test_path_decode_keeps_plus_literal() {
        assert_eq!(path_decode("a+b"), "a+b");
        assert_eq!(path_decode("a%2Bb"), "a+b");
        assert_eq!(path_decode("shop%201"), "shop 1");
        assert_eq!(path_decode("%zz"), "%zz");
    }

    #[test]
    fn test_repeated_query_param_keeps_first() {
        let req = ApiRequest::get("/api/data?negocio=first&negocio=second");
        assert_eq!(req.param("negocio"), Some("first"));
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert!("PATCH".parse::<Method>().is_err());
    }
}
