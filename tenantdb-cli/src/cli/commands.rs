// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tenantdb::{IdPolicy, StorageType, StoreConfig};

#[derive(Parser, Debug)]
#[command(name = "tenantdb", version, about = "TenantDB - multi-tenant document store")]
pub struct Cli {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<log::Level>,

    /// Shorthand for --log-level debug
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where and how to open the store; unset values come from TENANTDB_* variables
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Database directory
    #[arg(long, global = true)]
    pub path: Option<PathBuf>,

    /// Storage backend (sled, memory)
    #[arg(long, global = true)]
    pub storage: Option<StorageType>,

    /// Record id policy (truthy, present)
    #[arg(long = "id-policy", global = true)]
    pub id_policy: Option<IdPolicy>,
}

impl StoreArgs {
    pub fn to_config(&self) -> Result<StoreConfig, String> {
        let mut config = StoreConfig::from_env()?;
        if let Some(path) = &self.path {
            config.path = path.clone();
        }
        if let Some(storage) = self.storage {
            config.storage_type = storage;
        }
        if let Some(policy) = self.id_policy {
            config.id_policy = policy;
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print version information
    Version,

    /// Manage schema descriptors
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },

    /// Manage records of a namespace
    Record {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Show schema and record counts
    Stats {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Send a raw request through the API router, e.g. `request GET "/api/data?negocio=shop1"`
    Request {
        method: String,
        target: String,

        /// JSON request body
        #[arg(long)]
        body: Option<String>,
    },

    /// Delete every schema and record (development only)
    Reset {
        /// Skip the safety check
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SchemaAction {
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    Get {
        name: String,
    },
    Create {
        name: String,

        /// JSON array of field descriptions
        #[arg(long, default_value = "[]")]
        fields: String,

        /// JSON object of settings
        #[arg(long)]
        config: Option<String>,
    },
    /// Delete a schema and every record of its namespace
    Delete {
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecordAction {
    List {
        namespace: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    Get {
        namespace: String,
        #[arg(allow_hyphen_values = true)]
        id: i64,
    },
    /// Create from a JSON object, or from a JSON array as one bulk write
    Create {
        namespace: String,
        json: String,
    },
    Update {
        namespace: String,
        #[arg(allow_hyphen_values = true)]
        id: i64,
        json: String,
    },
    Delete {
        namespace: String,
        #[arg(allow_hyphen_values = true)]
        id: i64,
    },
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_record_create() {
        let cli = Cli::try_parse_from([
            "tenantdb",
            "--path",
            "/tmp/db",
            "record",
            "create",
            "shop1",
            r#"{"name":"Widget"}"#,
        ])
        .unwrap();
        assert_eq!(cli.store.path, Some(PathBuf::from("/tmp/db")));
        match cli.command {
            Commands::Record {
                action: RecordAction::Create { namespace, json },
            } => {
                assert_eq!(namespace, "shop1");
                assert_eq!(json, r#"{"name":"Widget"}"#);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tenantdb",
            "stats",
            "--storage",
            "memory",
            "--id-policy",
            "present",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.store.storage, Some(StorageType::Memory));
        assert_eq!(cli.store.id_policy, Some(IdPolicy::Present));
        assert!(matches!(
            cli.command,
            Commands::Stats {
                format: OutputFormat::Json
            }
        ));
    }

    #[test]
    fn test_negative_record_id() {
        let cli = Cli::try_parse_from(["tenantdb", "record", "get", "shop1", "-3"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Record {
                action: RecordAction::Get { id: -3, .. }
            }
        ));
    }
}
