// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Store configuration

use crate::storage::StorageType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the database directory
pub const ENV_PATH: &str = "TENANTDB_PATH";
/// Environment variable selecting the storage backend
pub const ENV_STORAGE: &str = "TENANTDB_STORAGE";
/// Environment variable selecting the id policy
pub const ENV_ID_POLICY: &str = "TENANTDB_ID_POLICY";

/// Default database directory when nothing else is configured
pub const DEFAULT_PATH: &str = "tenantdb_data";
/// Default number of namespace lock stripes
pub const DEFAULT_LOCK_STRIPES: usize = 64;

/// How `create` decides whether a record body already carries its id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdPolicy {
    /// An `id` that is null, false, 0, 0.0, "", [] or {} counts as absent and
    /// the record gets an allocated id. Compatible with existing callers.
    Truthy,
    /// Any `id` key counts as supplied; 0 is a legal id.
    Present,
}

impl Default for IdPolicy {
    fn default() -> Self {
        IdPolicy::Truthy
    }
}

impl std::str::FromStr for IdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "truthy" => Ok(IdPolicy::Truthy),
            "present" => Ok(IdPolicy::Present),
            _ => Err(format!(
                "Unknown id policy: {}. Valid options: truthy, present",
                s
            )),
        }
    }
}

impl std::fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IdPolicy::Truthy => "truthy",
            IdPolicy::Present => "present",
        };
        write!(f, "{}", name)
    }
}

/// Configuration for opening a `TenantStore`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database directory (unused by the memory backend)
    pub path: PathBuf,

    /// Storage backend
    pub storage_type: StorageType,

    /// Record id policy for `create` and bulk writes
    pub id_policy: IdPolicy,

    /// Flush the backend to disk after every successful commit
    pub flush_on_commit: bool,

    /// Number of namespace lock stripes
    pub lock_stripes: usize,
}

impl StoreConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            storage_type: StorageType::default(),
            id_policy: IdPolicy::default(),
            flush_on_commit: false,
            lock_stripes: DEFAULT_LOCK_STRIPES,
        }
    }

    /// Configuration for a process-local, non-durable store
    pub fn in_memory() -> Self {
        Self::new("").with_storage_type(StorageType::Memory)
    }

    /// Build a configuration from `TENANTDB_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, String> {
        let path = std::env::var(ENV_PATH).unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::new(path);

        if let Ok(storage) = std::env::var(ENV_STORAGE) {
            config.storage_type = storage.parse()?;
        }
        if let Ok(policy) = std::env::var(ENV_ID_POLICY) {
            config.id_policy = policy.parse()?;
        }
        Ok(config)
    }

    pub fn with_storage_type(mut self, storage_type: StorageType) -> Self {
        self.storage_type = storage_type;
        self
    }

    pub fn with_id_policy(mut self, id_policy: IdPolicy) -> Self {
        self.id_policy = id_policy;
        self
    }

    pub fn with_flush_on_commit(mut self, flush: bool) -> Self {
        self.flush_on_commit = flush;
        self
    }

    pub fn with_lock_stripes(mut self, stripes: usize) -> Self {
        self.lock_stripes = stripes.max(1);
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::new("/tmp/db");
        assert_eq!(config.storage_type, StorageType::Sled);
        assert_eq!(config.id_policy, IdPolicy::Truthy);
        assert!(!config.flush_on_commit);
        assert_eq!(config.lock_stripes, DEFAULT_LOCK_STRIPES);
    }

    #[test]
    fn test_builders() {
        let config = StoreConfig::in_memory()
            .with_id_policy(IdPolicy::Present)
            .with_lock_stripes(0);
        assert_eq!(config.storage_type, StorageType::Memory);
        assert_eq!(config.id_policy, IdPolicy::Present);
        assert_eq!(config.lock_stripes, 1);
    }

    #[test]
    fn test_id_policy_parsing() {
        assert_eq!("present".parse::<IdPolicy>().unwrap(), IdPolicy::Present);
        assert_eq!("Truthy".parse::<IdPolicy>().unwrap(), IdPolicy::Truthy);
        assert!("strict".parse::<IdPolicy>().is_err());
    }
}
