
use std::sync::Arc;

use protodoc::{
    CatalogError, Collection, DocumentStore, MemoryStore, StatusCode, StoreError,
    codec::MaskError,
    model::{FieldMask, FieldValue, Message, Scalar, Value},
};
use test_helpers::*;

fn parts() -> Collection<MemoryStore> {
    Collection::new("part", part_schema(), MemoryStore::new())
}

fn mask(entries: &[&str]) -> FieldMask {
    FieldMask::parse(entries).unwrap()
}

#[test]
fn create_then_get_round_trips() {
    let parts = parts();
    let id = parts.create(&sample_part()).unwrap();

    let fetched = parts.get(&id).unwrap();
    assert_eq!(fetched.identity(), Some(id.as_str()));

    let mut expected = sample_part();
    expected.set_identity(&id).unwrap();
    assert_eq!(fetched, expected);
}

#[test]
fn create_ignores_caller_identity() {
    let parts = parts();
    let mut part = sample_part();
    part.set_identity("caller-chosen").unwrap();

    let id = parts.create(&part).unwrap();
    assert_ne!(id, "caller-chosen");
    assert_eq!(parts.get(&id).unwrap().identity(), Some(id.as_str()));
}

#[test]
fn stored_document_uses_tag_keys() {
    let parts = parts();
    let id = parts.create(&sample_part()).unwrap();
    let stored = parts.store().find_by_id(&id).unwrap().unwrap();

    assert_eq!(
        stored.keys().collect::<Vec<_>>(),
        vec!["_id", "_2", "_3", "_4", "_5"]
    );
    assert_eq!(stored.get("_5"), Some(&Value::from(250u32)));
}

#[test]
fn update_applies_masked_fields() {
    let parts = parts();
    let id = parts.create(&sample_part()).unwrap();

    let patch = Message::new(part_schema())
        .with("description", "RES 10K 0603 1%")
        .unwrap()
        .with(
            "attributes",
            vec![Message::new(attribute_schema()), attribute("package", "0805")],
        )
        .unwrap();
    parts
        .update(
            &id,
            &patch,
            &mask(&["description", "attributes.1.value", "stock", "tags.0"]),
        )
        .unwrap();

    let fetched = parts.get(&id).unwrap();
    assert_eq!(
        fetched.get("description"),
        Some(&FieldValue::Scalar(Scalar::from("RES 10K 0603 1%")))
    );
    assert!(!fetched.has("stock"));
    assert_eq!(
        fetched.get("tags").and_then(FieldValue::as_scalar_list),
        Some(&[Scalar::from("passive")][..])
    );
    assert_eq!(
        fetched.get("attributes").and_then(FieldValue::as_message_list),
        Some(&[attribute("resistance", "10k"), attribute("package", "0805")][..])
    );
}

#[test]
fn update_can_remove_a_whole_element() {
    let parts = parts();
    let id = parts.create(&sample_part()).unwrap();

    let patch = Message::new(part_schema());
    parts.update(&id, &patch, &mask(&["attributes.0"])).unwrap();

    let fetched = parts.get(&id).unwrap();
    assert_eq!(
        fetched.get("attributes").and_then(FieldValue::as_message_list),
        Some(&[attribute("package", "0603")][..])
    );
}

#[test]
fn whole_element_replace_drops_fields_the_patch_lacks() {
    let parts = parts();
    let id = parts.create(&sample_part()).unwrap();

    let replacement = Message::new(attribute_schema()).with("value", "22k").unwrap();
    let patch = Message::new(part_schema())
        .with("attributes", vec![replacement.clone()])
        .unwrap();
    parts.update(&id, &patch, &mask(&["attributes.0"])).unwrap();

    let fetched = parts.get(&id).unwrap();
    let attributes = fetched
        .get("attributes")
        .and_then(FieldValue::as_message_list)
        .unwrap();
    assert_eq!(attributes, &[replacement, attribute("package", "0603")][..]);
    assert!(!attributes[0].has("name"));
}

#[test]
fn whole_message_list_element_update_is_repeatable() {
    let parts = parts();
    let id = parts.create(&sample_part()).unwrap();

    let patch = Message::new(part_schema())
        .with("attributes", vec![attribute("tolerance", "1%")])
        .unwrap();
    let mask = mask(&["attributes.0", "description"]);
    parts.update(&id, &patch, &mask).unwrap();
    let once = parts.store().find_by_id(&id).unwrap();
    parts.update(&id, &patch, &mask).unwrap();
    assert_eq!(parts.store().find_by_id(&id).unwrap(), once);
    assert!(!parts.get(&id).unwrap().has("description"));
}

#[test]
fn element_set_past_the_end_reads_back_compacted() {
    let parts = parts();
    let id = parts.create(&sample_part()).unwrap();

    let patch = Message::new(part_schema())
        .with(
            "tags",
            vec![
                Scalar::from("a"),
                Scalar::from("b"),
                Scalar::from("c"),
                Scalar::from("rohs"),
            ],
        )
        .unwrap();
    parts.update(&id, &patch, &mask(&["tags.3"])).unwrap();

    let stored = parts.store().find_by_id(&id).unwrap().unwrap();
    let slots = stored.get("_4").and_then(Value::as_array).unwrap();
    assert_eq!(slots.len(), 4);
    assert!(slots[2].is_hole());

    assert_eq!(
        parts.get(&id).unwrap().get("tags").and_then(FieldValue::as_scalar_list),
        Some(&[Scalar::from("smd"), Scalar::from("passive"), Scalar::from("rohs")][..])
    );
}

#[test]
fn unknown_mask_fields_leave_document_unchanged() {
    let parts = parts();
    let id = parts.create(&sample_part()).unwrap();
    let before = parts.store().find_by_id(&id).unwrap();

    let patch = Message::new(part_schema()).with("stock", 1u32).unwrap();
    parts.update(&id, &patch, &mask(&["colour"])).unwrap();
    assert_eq!(parts.store().find_by_id(&id).unwrap(), before);
}

#[test]
fn invalid_mask_is_invalid_argument() {
    let parts = parts();
    let id = parts.create(&sample_part()).unwrap();

    let err = parts
        .update(&id, &sample_part(), &mask(&["tags"]))
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::InvalidMask(MaskError::MissingIndex { .. })
    ));
    assert_eq!(err.status(), StatusCode::InvalidArgument);

    let err = parts.update(&id, &sample_part(), &mask(&["id"])).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::InvalidMask(MaskError::IdentityField { .. })
    ));
}

#[test]
fn malformed_id_is_invalid_argument() {
    let parts = parts();
    for id in ["", "not-an-id", "5f1d7e1c2a4b3c00112233"] {
        let err = parts.get(id).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidId { .. }));
        assert_eq!(err.status(), StatusCode::InvalidArgument);
    }
    assert!(matches!(
        parts.delete("nope"),
        Err(CatalogError::InvalidId { .. })
    ));
}

#[test]
fn missing_document_is_not_found() {
    let parts = parts();
    let id = "5f1d7e1c2a4b3c0011223344";

    let err = parts.get(id).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));
    assert_eq!(err.status(), StatusCode::NotFound);
    assert_eq!(err.to_string(), format!("no such part: '{id}'"));

    let patch = Message::new(part_schema()).with("stock", 1u32).unwrap();
    assert!(matches!(
        parts.update(id, &patch, &mask(&["stock"])),
        Err(CatalogError::NotFound { .. })
    ));
    assert!(matches!(
        parts.delete(id),
        Err(CatalogError::NotFound { .. })
    ));
}

#[test]
fn delete_removes_document() {
    let parts = parts();
    let id = parts.create(&sample_part()).unwrap();
    parts.delete(&id).unwrap();
    assert!(matches!(parts.get(&id), Err(CatalogError::NotFound { .. })));
}

#[test]
fn list_decodes_every_document() {
    let parts = parts();
    let a = parts.create(&sample_part()).unwrap();
    let b = parts
        .create(&Message::new(part_schema()).with("stock", 3u32).unwrap())
        .unwrap();

    let listed = parts.list().unwrap();
    let ids: Vec<_> = listed.iter().filter_map(Message::identity).collect();
    assert_eq!(ids, vec![a.as_str(), b.as_str()]);
}

#[test]
fn messages_of_another_schema_are_rejected() {
    let parts = parts();
    let err = parts.create(&attribute("a", "b")).unwrap_err();
    assert!(matches!(err, CatalogError::WrongSchema { .. }));
    assert_eq!(err.status(), StatusCode::InvalidArgument);
}

#[test]
fn store_errors_map_to_status() {
    let err = CatalogError::from(StoreError::IdentityPresent {
        key: "_id".to_string(),
    });
    assert_eq!(err.status(), StatusCode::InvalidArgument);
    assert_eq!(CatalogError::from(StoreError::Poisoned).status(), StatusCode::Internal);
    assert_eq!(StatusCode::NotFound.to_string(), "NOT_FOUND");
}

#[test]
fn collection_over_shared_store() {
    let store = Arc::new(MemoryStore::new());
    let parts = Collection::new("part", part_schema(), store.clone());
    let id = parts.create(&sample_part()).unwrap();
    assert_eq!(store.len().unwrap(), 1);
    assert!(store.find_by_id(&id).unwrap().is_some());
}
