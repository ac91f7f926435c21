
use protodoc_codec::{Codec, KeyLayout, MaskError, MaskTarget, translate_mask};
use protodoc_core::FieldMask;
use test_helpers::*;

fn field(raw: &str) -> MaskTarget {
    MaskTarget {
        path: path(raw),
        repeated_element: false,
    }
}

fn element(raw: &str) -> MaskTarget {
    MaskTarget {
        path: path(raw),
        repeated_element: true,
    }
}

fn translate(entries: &[&str]) -> Result<Vec<MaskTarget>, MaskError> {
    let mask = FieldMask::parse(entries).unwrap();
    translate_mask(&sample_schema(), &mask)
}

#[test]
fn names_map_to_tag_paths() {
    let targets = translate(&[
        "string_field_1",
        "uint64_field_2",
        "repeated_nested_field_4.2.bool_field_1",
    ])
    .unwrap();
    assert_eq!(
        targets,
        vec![field("_1"), field("_2"), field("_4.2._1")]
    );
}

#[test]
fn trailing_index_marks_repeated_element() {
    let targets = translate(&["repeated_string_field_5.2", "repeated_nested_field_4.0"]).unwrap();
    assert_eq!(targets, vec![element("_5.2"), element("_4.0")]);
}

#[test]
fn singular_message_and_its_sub_fields() {
    let targets = translate(&["message_field_3", "message_field_3.bytes_field_2"]).unwrap();
    assert_eq!(targets, vec![field("_3"), field("_3._2")]);
}

#[test]
fn unknown_names_are_skipped() {
    let targets = translate(&["nope", "message_field_3.nope", "repeated_nested_field_4.0.nope"])
        .unwrap();
    assert!(targets.is_empty());
}

#[test]
fn repeated_field_without_index_is_rejected() {
    let err = translate(&["repeated_string_field_5"]).unwrap_err();
    assert_eq!(
        err,
        MaskError::MissingIndex {
            path: "repeated_string_field_5".to_string(),
            field: "repeated_string_field_5".to_string(),
        }
    );
    assert!(matches!(
        translate(&["repeated_nested_field_4.bool_field_1"]),
        Err(MaskError::MissingIndex { .. })
    ));
}

#[test]
fn index_on_singular_field_is_rejected() {
    assert!(matches!(
        translate(&["message_field_3.0"]),
        Err(MaskError::UnexpectedIndex { index: 0, .. })
    ));
    assert!(matches!(
        translate(&["0"]),
        Err(MaskError::UnexpectedIndex { .. })
    ));
}

#[test]
fn descending_into_scalar_is_rejected() {
    assert!(matches!(
        translate(&["string_field_1.0"]),
        Err(MaskError::ScalarHasNoChildren { .. })
    ));
    assert!(matches!(
        translate(&["repeated_string_field_5.0.x"]),
        Err(MaskError::ScalarHasNoChildren { .. })
    ));
}

#[test]
fn identity_field_cannot_be_masked() {
    assert!(matches!(
        translate(&["id"]),
        Err(MaskError::IdentityField { .. })
    ));
}

#[test]
fn first_invalid_entry_fails_the_whole_mask() {
    assert!(translate(&["string_field_1", "repeated_string_field_5"]).is_err());
}

#[test]
fn custom_layout_prefixes_every_segment() {
    let codec = Codec::new(KeyLayout::new("f", "key").unwrap());
    let mask = FieldMask::parse(["repeated_nested_field_4.1.int64_field_2"]).unwrap();
    let targets = codec.translate_mask(&sample_schema(), &mask).unwrap();
    assert_eq!(targets, vec![field("f4.1.f2")]);
}
