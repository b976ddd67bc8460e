// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for TenantDB

use colored::Colorize;
use serde_json::Value;
use std::sync::Arc;

use super::commands::{OutputFormat, RecordAction, SchemaAction, StoreArgs};
use super::output::ResultFormatter;
use tenantdb::{ApiRequest, Content, Method, Router, TenantStore};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn open_store(args: &StoreArgs) -> Result<Arc<TenantStore>, Box<dyn std::error::Error>> {
    let config = args.to_config()?;
    log::debug!("Opening store at {:?} ({})", config.path, config.storage_type);
    Ok(TenantStore::open(config)?)
}

fn parse_json(text: &str, what: &str) -> Result<Value, Box<dyn std::error::Error>> {
    serde_json::from_str(text).map_err(|e| format!("invalid JSON for {}: {}", what, e).into())
}

fn parse_object(text: &str, what: &str) -> Result<Content, Box<dyn std::error::Error>> {
    match parse_json(text, what)? {
        Value::Object(map) => Ok(map),
        _ => Err(format!("{} must be a JSON object", what).into()),
    }
}

/// Handle `schema` subcommands
pub fn handle_schema(args: &StoreArgs, action: SchemaAction) -> CliResult {
    let store = open_store(args)?;
    match action {
        SchemaAction::List { format } => {
            print!("{}", ResultFormatter::schemas(&store.list_schemas()?, format));
        }
        SchemaAction::Get { name } => match store.get_schema(&name)? {
            Some(descriptor) => println!("{}", ResultFormatter::json(&descriptor.to_wire())),
            None => return Err(format!("Schema '{}' not found", name).into()),
        },
        SchemaAction::Create {
            name,
            fields,
            config,
        } => {
            let fields = match parse_json(&fields, "--fields")? {
                Value::Array(fields) => fields,
                _ => return Err("--fields must be a JSON array".into()),
            };
            let config = match config {
                Some(text) => parse_object(&text, "--config")?,
                None => Content::new(),
            };
            let descriptor = store.create_schema(&name, config, fields)?;
            println!("{}", format!("Schema '{}' created", descriptor.name).green());
        }
        SchemaAction::Delete { name } => {
            if store.delete_schema(&name)? {
                println!("{}", format!("Schema '{}' deleted", name).green());
            } else {
                return Err(format!("Schema '{}' not found", name).into());
            }
        }
    }
    Ok(())
}

/// Handle `record` subcommands
pub fn handle_record(args: &StoreArgs, action: RecordAction) -> CliResult {
    let store = open_store(args)?;
    match action {
        RecordAction::List { namespace, format } => {
            print!(
                "{}",
                ResultFormatter::records(&store.list_records(&namespace)?, format)
            );
        }
        RecordAction::Get { namespace, id } => match store.get_record(&namespace, id)? {
            Some(content) => println!("{}", ResultFormatter::json(&Value::Object(content))),
            None => return Err(format!("Record {} not found in {}", id, namespace).into()),
        },
        RecordAction::Create { namespace, json } => match parse_json(&json, "record")? {
            Value::Object(content) => {
                let stored = store.create_record(&namespace, content)?;
                println!("{}", ResultFormatter::json(&Value::Object(stored)));
            }
            Value::Array(items) => {
                let mut contents = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(content) => contents.push(content),
                        _ => return Err("every bulk item must be a JSON object".into()),
                    }
                }
                let stored = store.create_records(&namespace, contents)?;
                println!(
                    "{}",
                    format!("{} record(s) created", stored.len()).green()
                );
                print!("{}", ResultFormatter::records(&stored, OutputFormat::Table));
            }
            _ => return Err("record must be a JSON object or array".into()),
        },
        RecordAction::Update {
            namespace,
            id,
            json,
        } => {
            let stored = store.update_record(&namespace, id, parse_object(&json, "record")?)?;
            println!("{}", ResultFormatter::json(&Value::Object(stored)));
        }
        RecordAction::Delete { namespace, id } => {
            if store.delete_record(&namespace, id)? {
                println!("{}", format!("Record {} deleted from {}", id, namespace).green());
            } else {
                return Err(format!("Record {} not found in {}", id, namespace).into());
            }
        }
    }
    Ok(())
}

/// Handle the `stats` command
pub fn handle_stats(args: &StoreArgs, format: OutputFormat) -> CliResult {
    let store = open_store(args)?;
    print!("{}", ResultFormatter::stats(&store.stats()?, format));
    Ok(())
}

/// Handle the `request` command: drive the API router directly
pub fn handle_request(args: &StoreArgs, method: &str, target: &str, body: Option<&str>) -> CliResult {
    let method: Method = method.parse()?;
    let mut request = ApiRequest::new(method, target);
    if let Some(text) = body {
        request = request.with_body(parse_json(text, "--body")?);
    }

    let router = Router::new(open_store(args)?);
    let response = router.handle(&request);
    println!("{}", ResultFormatter::response(&response));
    Ok(())
}

/// Handle the `reset` command
pub fn handle_reset(args: &StoreArgs, yes: bool) -> CliResult {
    if !yes {
        println!(
            "{}",
            "This deletes every schema and record. Re-run with --yes to confirm.".yellow()
        );
        return Err("reset not confirmed".into());
    }
    let store = open_store(args)?;
    let removed = store.clear_all()?;
    store.flush()?;
    println!("{}", format!("Removed {} entries", removed).green());
    Ok(())
}
