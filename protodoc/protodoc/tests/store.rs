
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use protodoc::{
    DocumentStore, MemoryStore, StoreError,
    codec::{KeyLayout, UpdateDirective},
    model::{Scalar, Value},
};
use test_helpers::*;

fn stored_part(store: &MemoryStore) -> String {
    store
        .insert(doc([
            ("_2", Value::from("RES 10K")),
            (
                "_3",
                Value::Array(vec![
                    Value::Document(doc([("_1", Value::from("a")), ("_2", Value::from("1"))])),
                    Value::Document(doc([("_1", Value::from("b")), ("_2", Value::from("2"))])),
                    Value::Document(doc([("_1", Value::from("c")), ("_2", Value::from("3"))])),
                ]),
            ),
            ("_5", Value::from(7u32)),
        ]))
        .unwrap()
}

#[test]
fn insert_assigns_hex_identity_first() {
    let store = MemoryStore::new();
    let id = store.insert(doc([("_2", Value::from("x"))])).unwrap();

    assert_eq!(id.len(), 24);
    assert!(store.is_valid_id(&id));
    let stored = store.find_by_id(&id).unwrap().unwrap();
    assert_eq!(stored.keys().collect::<Vec<_>>(), vec!["_id", "_2"]);
    assert_eq!(stored.get("_id"), Some(&Value::from(id.as_str())));
}

#[test]
fn identities_are_distinct() {
    let store = MemoryStore::new();
    let a = store.insert(doc([])).unwrap();
    let b = store.insert(doc([])).unwrap();
    assert_ne!(a, b);
    assert_eq!(store.len().unwrap(), 2);
}

#[test]
fn insert_rejects_document_with_identity() {
    let store = MemoryStore::new();
    let err = store
        .insert(doc([("_id", Value::from("mine"))]))
        .unwrap_err();
    assert!(matches!(err, StoreError::IdentityPresent { ref key } if key == "_id"));
    assert!(store.is_empty().unwrap());
}

#[test]
fn custom_layout_uses_its_identity_key() {
    let store = MemoryStore::with_layout(KeyLayout::new("f", "key").unwrap());
    let id = store.insert(doc([("f1", Value::from(true))])).unwrap();
    let stored = store.find_by_id(&id).unwrap().unwrap();
    assert!(stored.contains_key("key"));
    assert!(!stored.contains_key("_id"));
}

#[test]
fn id_validation() {
    let store = MemoryStore::new();
    assert!(store.is_valid_id("5f1d7e1c2a4b3c0011223344"));
    assert!(!store.is_valid_id("5f1d7e1c2a4b3c001122334"));
    assert!(!store.is_valid_id("zzzzzzzzzzzzzzzzzzzzzzzz"));
    assert!(!store.is_valid_id(""));
}

#[test]
fn set_overwrites_and_creates_paths() {
    let store = MemoryStore::new();
    let id = stored_part(&store);
    let directive = UpdateDirective {
        set: vec![
            (path("_2"), Scalar::from("RES 22K")),
            (path("_3.1._2"), Scalar::from("20")),
            (path("_3.4._1"), Scalar::from("e")),
            (path("_6._1"), Scalar::from(true)),
        ],
        ..Default::default()
    };
    assert_eq!(store.apply_update(&id, &directive).unwrap(), 1);

    let stored = store.find_by_id(&id).unwrap().unwrap();
    assert_eq!(stored.get("_2"), Some(&Value::from("RES 22K")));

    let attributes = stored.get("_3").and_then(Value::as_array).unwrap();
    assert_eq!(attributes.len(), 5);
    assert_eq!(
        attributes[1],
        Value::Document(doc([("_1", Value::from("b")), ("_2", Value::from("20"))]))
    );
    assert!(attributes[3].is_hole());
    assert_eq!(
        attributes[4],
        Value::Document(doc([("_1", Value::from("e"))]))
    );
    assert_eq!(
        stored.get("_6"),
        Some(&Value::Document(doc([("_1", Value::from(true))])))
    );
}

#[test]
fn unset_removes_keys() {
    let store = MemoryStore::new();
    let id = stored_part(&store);
    let directive = UpdateDirective {
        unset: BTreeSet::from([path("_5"), path("_3.0._2"), path("_9")]),
        ..Default::default()
    };
    store.apply_update(&id, &directive).unwrap();

    let stored = store.find_by_id(&id).unwrap().unwrap();
    assert!(!stored.contains_key("_5"));
    let attributes = stored.get("_3").and_then(Value::as_array).unwrap();
    assert_eq!(attributes[0], Value::Document(doc([("_1", Value::from("a"))])));
}

#[test]
fn pull_removes_elements_by_original_index() {
    let store = MemoryStore::new();
    let id = stored_part(&store);
    let directive = UpdateDirective {
        pull: BTreeMap::from([(path("_3"), BTreeSet::from([0, 2, 8]))]),
        ..Default::default()
    };
    store.apply_update(&id, &directive).unwrap();

    let stored = store.find_by_id(&id).unwrap().unwrap();
    let attributes = stored.get("_3").and_then(Value::as_array).unwrap();
    assert_eq!(
        attributes,
        &[Value::Document(doc([("_1", Value::from("b")), ("_2", Value::from("2"))]))]
    );
}

#[test]
fn set_and_unset_are_idempotent() {
    let store = MemoryStore::new();
    let id = stored_part(&store);
    let directive = UpdateDirective {
        set: vec![(path("_3.2._1"), Scalar::from("z"))],
        unset: BTreeSet::from([path("_5"), path("_3.0._1")]),
        ..Default::default()
    };

    store.apply_update(&id, &directive).unwrap();
    let once = store.find_by_id(&id).unwrap().unwrap();
    store.apply_update(&id, &directive).unwrap();
    let twice = store.find_by_id(&id).unwrap().unwrap();
    assert_eq!(once, twice);
}

#[test]
fn unset_runs_before_set() {
    let store = MemoryStore::new();
    let id = stored_part(&store);
    let directive = UpdateDirective {
        set: vec![(path("_3.1._2"), Scalar::from("22"))],
        unset: BTreeSet::from([path("_3.1")]),
        ..Default::default()
    };
    store.apply_update(&id, &directive).unwrap();

    let stored = store.find_by_id(&id).unwrap().unwrap();
    let attributes = stored.get("_3").and_then(Value::as_array).unwrap();
    assert_eq!(attributes.len(), 3);
    assert_eq!(attributes[1], Value::Document(doc([("_2", Value::from("22"))])));
}

#[test]
fn repeated_pull_is_positional() {
    let store = MemoryStore::new();
    let id = stored_part(&store);
    let directive = UpdateDirective {
        pull: BTreeMap::from([(path("_3"), BTreeSet::from([0]))]),
        ..Default::default()
    };

    store.apply_update(&id, &directive).unwrap();
    store.apply_update(&id, &directive).unwrap();

    let stored = store.find_by_id(&id).unwrap().unwrap();
    let attributes = stored.get("_3").and_then(Value::as_array).unwrap();
    assert_eq!(
        attributes,
        &[Value::Document(doc([("_1", Value::from("c")), ("_2", Value::from("3"))]))]
    );
}

#[test]
fn missing_document_matches_nothing() {
    let store = MemoryStore::new();
    let directive = UpdateDirective::default();
    assert_eq!(
        store.apply_update("000000000000000000000001", &directive).unwrap(),
        0
    );
    assert_eq!(store.delete("000000000000000000000001").unwrap(), 0);
    assert!(store.find_by_id("000000000000000000000001").unwrap().is_none());
}

#[test]
fn delete_and_list() {
    let store = MemoryStore::new();
    let a = stored_part(&store);
    let _b = stored_part(&store);
    assert_eq!(store.list().unwrap().len(), 2);

    assert_eq!(store.delete(&a).unwrap(), 1);
    assert_eq!(store.list().unwrap().len(), 1);
    assert!(store.find_by_id(&a).unwrap().is_none());
}

#[test]
fn shared_store_behind_arc() {
    let store = Arc::new(MemoryStore::new());
    let id = DocumentStore::insert(&store, doc([("_2", Value::from("x"))])).unwrap();
    assert!(DocumentStore::find_by_id(&store, &id).unwrap().is_some());
    assert!(DocumentStore::is_valid_id(&store, &id));
}
