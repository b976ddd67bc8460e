//! Test fixture for TenantDB integration tests
//!
//! Provides isolated store instances using ONLY the public API.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tenantdb::{
    ApiRequest, ApiResponse, Content, IdPolicy, Router, StorageType, StoreConfig, TenantStore,
};

/// Test fixture with an isolated store
pub struct TestFixture {
    store: Arc<TenantStore>,
    router: Router,
    namespace: String,
    db_path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TestFixture {
    /// Sled-backed store in a fresh temp dir, default id policy
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_config(|config| config)
    }

    /// Memory-backed store
    pub fn in_memory() -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_config(|config| config.with_storage_type(StorageType::Memory))
    }

    /// Sled-backed store with the given id policy
    pub fn with_policy(policy: IdPolicy) -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_config(|config| config.with_id_policy(policy))
    }

    pub fn with_config(
        customize: impl FnOnce(StoreConfig) -> StoreConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = tempfile::tempdir()?;
        let db_path = temp_dir.path().join("tenantdb_test");
        let store = TenantStore::open(customize(StoreConfig::new(&db_path)))?;
        let router = Router::new(Arc::clone(&store));

        // Unique namespace so assertions never see another test's data
        let namespace = format!("test_ns_{}", fastrand::u64(..));

        Ok(TestFixture {
            store,
            router,
            namespace,
            db_path,
            _temp_dir: temp_dir,
        })
    }

    pub fn store(&self) -> &Arc<TenantStore> {
        &self.store
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Run a request through the router
    pub fn request(&self, request: ApiRequest) -> ApiResponse {
        self.router.handle(&request)
    }

    /// Close the store and open it again at the same path
    pub fn reopen(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let config = self.store.config().clone();

        // Drop every handle to the old store so sled releases the directory
        let placeholder = TenantStore::in_memory()?;
        self.router = Router::new(Arc::clone(&placeholder));
        self.store = placeholder;

        self.store = TenantStore::open(config)?;
        self.router = Router::new(Arc::clone(&self.store));
        Ok(())
    }

    /// Record ids of the fixture namespace, in list order
    pub fn ids(&self) -> Vec<i64> {
        self.store
            .list_records(&self.namespace)
            .expect("list records")
            .iter()
            .map(|content| content["id"].as_i64().expect("integer id"))
            .collect()
    }
}

/// Convert a JSON object literal to a record body
pub fn body(value: Value) -> Content {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// Convert a JSON array of objects to record bodies
pub fn bodies(value: Value) -> Vec<Content> {
    match value {
        Value::Array(items) => items.into_iter().map(body).collect(),
        other => panic!("expected a JSON array, got {}", other),
    }
}
