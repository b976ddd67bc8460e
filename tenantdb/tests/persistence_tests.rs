//! Durability across reopen on the sled backend

#[path = "testutils/mod.rs"]
mod testutils;

use serde_json::json;
use tenantdb::{Content, IdPolicy, StorageType, StoreConfig, TenantStore};
use testutils::test_fixture::{bodies, body, TestFixture};

#[test]
fn test_schemas_and_records_survive_reopen() {
    let mut fixture = TestFixture::new().expect("Failed to create fixture");
    let ns = fixture.namespace().to_string();

    fixture
        .store()
        .create_schema(&ns, body(json!({"k": "v"})), vec![json!("f")])
        .unwrap();
    fixture
        .store()
        .create_records(&ns, bodies(json!([{"a": 1}, {"a": 2}])))
        .unwrap();
    fixture.store().flush().unwrap();

    fixture.reopen().expect("reopen store");

    let schema = fixture.store().get_schema(&ns).unwrap().expect("schema kept");
    assert_eq!(schema.config, body(json!({"k": "v"})));
    assert_eq!(fixture.ids(), vec![1, 2]);

    // Allocation resumes from persisted state
    let next = fixture.store().create_record(&ns, Content::new()).unwrap();
    assert_eq!(next["id"], json!(3));
}

#[test]
fn test_flush_on_commit_store_reopens_cleanly() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(temp_dir.path().join("db"))
        .with_flush_on_commit(true)
        .with_id_policy(IdPolicy::Present);

    {
        let store = TenantStore::open(config.clone()).unwrap();
        store.create_record("shop1", body(json!({"id": 0}))).unwrap();
    }

    let store = TenantStore::open(config).unwrap();
    assert_eq!(store.get_record("shop1", 0).unwrap(), Some(body(json!({"id": 0}))));
}

#[test]
fn test_clear_all_is_durable() {
    let mut fixture = TestFixture::new().expect("Failed to create fixture");
    let ns = fixture.namespace().to_string();
    fixture.store().create_schema(&ns, Content::new(), vec![]).unwrap();
    fixture.store().create_record(&ns, Content::new()).unwrap();

    assert_eq!(fixture.store().clear_all().unwrap(), 2);
    fixture.reopen().expect("reopen store");

    let stats = fixture.store().stats().unwrap();
    assert_eq!(stats.total_schemas, 0);
    assert_eq!(stats.total_records, 0);
}

#[test]
fn test_memory_backend_is_not_durable() {
    let store = TenantStore::in_memory().unwrap();
    assert_eq!(store.config().storage_type, StorageType::Memory);
    store.create_record("shop1", Content::new()).unwrap();
    drop(store);

    let fresh = TenantStore::in_memory().unwrap();
    assert!(fresh.list_records("shop1").unwrap().is_empty());
}
