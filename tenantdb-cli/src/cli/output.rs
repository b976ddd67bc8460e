// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for CLI output

use super::commands::OutputFormat;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use serde_json::Value;
use tenantdb::{ApiResponse, Content, SchemaDescriptor, StoreStats, ID_FIELD};

/// Formatter for store results
pub struct ResultFormatter;

impl ResultFormatter {
    pub fn schemas(descriptors: &[SchemaDescriptor], format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::json(&Value::Array(
                descriptors.iter().map(|d| d.to_wire()).collect(),
            )),
            OutputFormat::Table => {
                if descriptors.is_empty() {
                    return format!("{}\n", "No schemas found".yellow());
                }
                let mut table = Self::table(&["name", "fields", "config", "created"]);
                for descriptor in descriptors {
                    table.add_row(vec![
                        descriptor.name.clone(),
                        descriptor.fields.len().to_string(),
                        Value::Object(descriptor.config.clone()).to_string(),
                        descriptor.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    ]);
                }
                format!(
                    "{}\n{}\n",
                    format!("Schemas: {}", descriptors.len()).bold().green(),
                    table
                )
            }
        }
    }

    /// Records as a table whose columns are the union of their keys, `id` first
    pub fn records(records: &[Content], format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::json(&Value::Array(
                records.iter().cloned().map(Value::Object).collect(),
            )),
            OutputFormat::Table => {
                if records.is_empty() {
                    return format!("{}\n", "No records found".yellow());
                }

                let mut columns = vec![ID_FIELD.to_string()];
                for record in records {
                    for key in record.keys() {
                        if !columns.contains(key) {
                            columns.push(key.clone());
                        }
                    }
                }

                let headers: Vec<&str> = columns.iter().map(String::as_str).collect();
                let mut table = Self::table(&headers);
                for record in records {
                    table.add_row(
                        columns
                            .iter()
                            .map(|col| record.get(col).map(Self::cell_text).unwrap_or_default())
                            .collect::<Vec<_>>(),
                    );
                }
                format!(
                    "{}\n{}\n",
                    format!("Records: {}", records.len()).bold().green(),
                    table
                )
            }
        }
    }

    pub fn stats(stats: &StoreStats, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::json(&serde_json::json!(stats)),
            OutputFormat::Table => {
                let mut output = format!(
                    "{} {}\n{} {}\n",
                    "Schemas:".bold(),
                    stats.total_schemas,
                    "Records:".bold(),
                    stats.total_records
                );
                if !stats.records_by_namespace.is_empty() {
                    let mut table = Self::table(&["namespace", "records"]);
                    for (namespace, count) in &stats.records_by_namespace {
                        table.add_row(vec![namespace.clone(), count.to_string()]);
                    }
                    output.push_str(&format!("{}\n", table));
                }
                output
            }
        }
    }

    /// Status line plus pretty JSON body
    pub fn response(response: &ApiResponse) -> String {
        let status = response.status.to_string();
        let status = if response.is_success() {
            status.green()
        } else if response.status >= 500 {
            status.red()
        } else {
            status.yellow()
        };
        format!("{} {}\n{}", "Status:".bold(), status, Self::json(&response.body))
    }

    pub fn json(value: &Value) -> String {
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|_| "{\"error\": \"could not serialize result\"}".to_string())
    }

    fn table(headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Green))
                .collect::<Vec<_>>(),
        );
        table
    }

    /// Strings print bare; everything else as compact JSON
    fn cell_text(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => "NULL".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Content {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_record_table_lists_union_of_columns() {
        colored::control::set_override(false);
        let rendered = ResultFormatter::records(
            &[
                record(json!({"id": 1, "name": "a"})),
                record(json!({"id": 2, "price": 3.5})),
            ],
            OutputFormat::Table,
        );
        assert!(rendered.contains("Records: 2"));
        assert!(rendered.contains("name"));
        assert!(rendered.contains("price"));
        assert!(rendered.contains("3.5"));
    }

    #[test]
    fn test_json_output_is_wire_shape() {
        let rendered = ResultFormatter::records(&[record(json!({"id": 1}))], OutputFormat::Json);
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, json!([{"id": 1}]));
    }
}
