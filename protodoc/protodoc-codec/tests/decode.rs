
use protodoc_codec::{Codec, IndexPolicy, KeyLayout, decode, encode};
use protodoc_core::{
    FieldDescriptor, FieldValue, Message, Scalar, ScalarKind, SchemaBuilder, Value,
};
use test_helpers::*;

#[test]
fn round_trip_full_message() {
    let message = full_sample();
    let document = encode(&message, None, IndexPolicy::Compact);
    assert_eq!(decode(&document, &sample_schema()), message);
}

#[test]
fn round_trip_with_identity() {
    let mut message = full_sample();
    message.set_identity("5f1d7e1c2a4b3c0011223344").unwrap();
    let document = encode(&message, None, IndexPolicy::Compact);
    assert_eq!(decode(&document, &sample_schema()), message);
}

#[test]
fn identity_key_decodes_to_identity_field() {
    let schema = sample_schema();
    let document = doc([("_id", Value::from("abc123")), ("_1", Value::from("x"))]);

    let message = decode(&document, &schema);
    assert_eq!(message.identity(), Some("abc123"));
    assert_eq!(
        message.get("string_field_1"),
        Some(&FieldValue::Scalar(Scalar::from("x")))
    );
    assert_eq!(message.len(), 2);
}

#[test]
fn non_string_identity_is_stringified() {
    let document = doc([("_id", Value::from(17i64))]);
    let message = decode(&document, &sample_schema());
    assert_eq!(message.identity(), Some("17"));
}

#[test]
fn identity_key_is_dropped_without_identity_field() {
    let document = doc([("_id", Value::from("abc")), ("_1", Value::from(true))]);
    let message = decode(&document, &nested_schema());
    assert_eq!(
        message,
        Message::new(nested_schema()).with("bool_field_1", true).unwrap()
    );
}

#[test]
fn unknown_keys_are_ignored() {
    let document = doc([
        ("foo", Value::from(1i32)),
        ("_99", Value::from(1i32)),
        ("_01", Value::from("padded")),
        ("_", Value::from("bare")),
        ("_1", Value::from("kept")),
    ]);
    let message = decode(&document, &sample_schema());
    assert_eq!(
        message,
        Message::new(sample_schema())
            .with("string_field_1", "kept")
            .unwrap()
    );
}

#[test]
fn empty_document_decodes_to_empty_message() {
    let message = decode(&doc([]), &sample_schema());
    assert!(message.is_empty());
}

#[test]
fn mismatched_shapes_are_skipped() {
    let document = doc([
        ("_1", Value::from(5i32)),
        ("_3", Value::from("not a document")),
        ("_4", Value::Document(doc([]))),
        ("_5", Value::from("not an array")),
    ]);
    assert!(decode(&document, &sample_schema()).is_empty());
}

#[test]
fn integers_are_coerced_into_field_kind() {
    let document = doc([
        ("_2", Value::from(12i64)),
        (
            "_3",
            Value::Document(doc([("_1", Value::from(-4i32))])),
        ),
    ]);
    let message = decode(&document, &sample_schema());
    assert_eq!(
        message.get("uint64_field_2"),
        Some(&FieldValue::Scalar(Scalar::U64(12)))
    );
    let nested = message
        .get("message_field_3")
        .and_then(FieldValue::as_message)
        .unwrap();
    assert_eq!(
        nested.get("sint64_field_1"),
        Some(&FieldValue::Scalar(Scalar::I64(-4)))
    );

    let negative = doc([("_2", Value::from(-1i64))]);
    assert!(decode(&negative, &sample_schema()).is_empty());

    let priced = SchemaBuilder::new("Priced")
        .field(FieldDescriptor::scalar(1, "price", ScalarKind::F32))
        .field(FieldDescriptor::scalar(2, "weight", ScalarKind::F64))
        .build()
        .unwrap();
    let stored = doc([("_1", Value::from(1.5f64)), ("_2", Value::from(0.25f32))]);
    let message = decode(&stored, &priced);
    assert_eq!(
        message.get("price"),
        Some(&FieldValue::Scalar(Scalar::F32(1.5)))
    );
    assert_eq!(
        message.get("weight"),
        Some(&FieldValue::Scalar(Scalar::F64(0.25)))
    );
}

#[test]
fn holes_and_foreign_elements_are_skipped() {
    let document = doc([
        (
            "_4",
            Value::Array(vec![
                Value::Hole,
                Value::Document(doc([("_2", Value::from(9i64))])),
                Value::from("stray"),
            ]),
        ),
        (
            "_5",
            Value::Array(vec![Value::Hole, Value::from("charlie"), Value::from(3i32)]),
        ),
    ]);
    let message = decode(&document, &sample_schema());

    let nested_items = message
        .get("repeated_nested_field_4")
        .and_then(FieldValue::as_message_list)
        .unwrap();
    assert_eq!(nested_items.len(), 1);
    assert_eq!(
        nested_items[0].get("int64_field_2"),
        Some(&FieldValue::Scalar(Scalar::I64(9)))
    );
    assert_eq!(
        message
            .get("repeated_string_field_5")
            .and_then(FieldValue::as_scalar_list),
        Some(&[Scalar::from("charlie")][..])
    );
}

#[test]
fn array_of_only_holes_leaves_field_absent() {
    let document = doc([("_5", Value::Array(vec![Value::Hole, Value::Hole]))]);
    assert!(decode(&document, &sample_schema()).is_empty());
}

#[test]
fn custom_layout_round_trip() {
    let codec = Codec::new(KeyLayout::new("t", "uid").unwrap());
    let mut message = full_sample();
    message.set_identity("x1").unwrap();

    let document = codec.encode(&message, None, IndexPolicy::Compact);
    assert!(document.contains_key("uid"));
    assert!(document.contains_key("t1"));
    assert_eq!(codec.decode(&document, &sample_schema()), message);

    // The default layout does not recognise these keys.
    assert!(decode(&document, &sample_schema()).is_empty());
}
