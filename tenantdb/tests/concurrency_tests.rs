//! Concurrent writers: auto-allocation never hands out an id twice

#[path = "testutils/mod.rs"]
mod testutils;

use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;
use testutils::test_fixture::{bodies, body, TestFixture};

const THREADS: usize = 8;
const PER_THREAD: usize = 25;

#[test]
fn test_concurrent_auto_ids_are_unique_and_dense() {
    let fixture = TestFixture::new().expect("Failed to create fixture");
    let store = Arc::clone(fixture.store());
    let ns = fixture.namespace().to_string();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            let ns = ns.clone();
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|i| {
                        let stored = store
                            .create_record(&ns, body(json!({"thread": t, "i": i})))
                            .expect("create record");
                        stored["id"].as_i64().expect("integer id")
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = BTreeSet::new();
    for handle in handles {
        for id in handle.join().expect("writer thread") {
            assert!(seen.insert(id), "id {} allocated twice", id);
        }
    }

    let total = (THREADS * PER_THREAD) as i64;
    assert_eq!(seen, (1..=total).collect::<BTreeSet<_>>());
    assert_eq!(fixture.ids().len() as i64, total);
}

#[test]
fn test_concurrent_bulk_and_single_writers() {
    let fixture = TestFixture::new().expect("Failed to create fixture");
    let store = Arc::clone(fixture.store());
    let ns = fixture.namespace().to_string();

    let bulk = {
        let store = Arc::clone(&store);
        let ns = ns.clone();
        thread::spawn(move || {
            for _ in 0..10 {
                store
                    .create_records(&ns, bodies(json!([{}, {}, {}, {}, {}])))
                    .expect("bulk insert");
            }
        })
    };
    let single = {
        let store = Arc::clone(&store);
        let ns = ns.clone();
        thread::spawn(move || {
            for _ in 0..50 {
                store.create_record(&ns, body(json!({}))).expect("insert");
            }
        })
    };
    bulk.join().unwrap();
    single.join().unwrap();

    assert_eq!(fixture.ids(), (1..=100).collect::<Vec<i64>>());
}

#[test]
fn test_writers_to_different_namespaces_proceed_independently() {
    let fixture = TestFixture::in_memory().expect("Failed to create fixture");
    let store = Arc::clone(fixture.store());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let ns = format!("tenant_{}", t);
                for _ in 0..20 {
                    store.create_record(&ns, body(json!({}))).unwrap();
                }
                ns
            })
        })
        .collect();

    for handle in handles {
        let ns = handle.join().unwrap();
        let ids: Vec<i64> = store
            .list_records(&ns)
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, (1..=20).collect::<Vec<i64>>());
    }
}

#[test]
fn test_cascade_delete_does_not_interleave_with_inserts() {
    let fixture = TestFixture::new().expect("Failed to create fixture");
    let store = Arc::clone(fixture.store());
    let ns = fixture.namespace().to_string();
    store
        .create_schema(&ns, Default::default(), vec![])
        .unwrap();

    let writer = {
        let store = Arc::clone(&store);
        let ns = ns.clone();
        thread::spawn(move || {
            for _ in 0..50 {
                store.create_record(&ns, body(json!({}))).unwrap();
            }
        })
    };
    let deleted = store.delete_schema(&ns).unwrap();
    writer.join().unwrap();

    assert!(deleted);
    // Whatever survived was written after the cascade, so ids restart densely
    let ids = fixture.ids();
    let expected: Vec<i64> = (1..=ids.len() as i64).collect();
    assert_eq!(ids, expected);
}
