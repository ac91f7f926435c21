//! Document → message.

use protodoc_core::{
    Document, FieldDescriptor, FieldShape, FieldValue, KeyLayout, Message, Scalar, SchemaRef,
    Value,
};
use tracing::trace;

pub(crate) fn decode_document(document: &Document, schema: &SchemaRef, layout: &KeyLayout) -> Message {
    let mut message = Message::new(schema.clone());

    for (key, value) in document.iter() {
        if layout.is_identity_key(key) {
            decode_identity(&mut message, value);
            continue;
        }
        let Some(field) = layout.parse_tag_key(key).and_then(|tag| schema.field_by_tag(tag)) else {
            trace!(schema = schema.name(), key, "skipping unknown key");
            continue;
        };
        match decode_field(field, value, layout) {
            Some(decoded) => {
                if let Err(e) = message.set_by_tag(field.tag, decoded) {
                    trace!(schema = schema.name(), key, error = %e, "skipping value");
                }
            }
            None => trace!(schema = schema.name(), key, "skipping value of mismatched shape"),
        }
    }

    message
}

fn decode_identity(message: &mut Message, value: &Value) {
    let Value::Scalar(id) = value else {
        return;
    };
    // Schemas without an identity field simply drop it.
    let _ = message.set_identity(id.to_string());
}

fn decode_field(field: &FieldDescriptor, value: &Value, layout: &KeyLayout) -> Option<FieldValue> {
    let decoded = match (field.shape(), value) {
        (FieldShape::Scalar(kind), Value::Scalar(s)) => FieldValue::Scalar(s.coerce(kind)?),
        (FieldShape::Message(_), Value::Document(doc)) => {
            FieldValue::Message(decode_document(doc, field.message_schema()?, layout))
        }
        (FieldShape::RepeatedScalar(kind), Value::Array(items)) => FieldValue::ScalarList(
            items
                .iter()
                .filter_map(Value::as_scalar)
                .filter_map(|s: &Scalar| s.coerce(kind))
                .collect(),
        ),
        (FieldShape::RepeatedMessage(_), Value::Array(items)) => {
            let nested = field.message_schema()?;
            FieldValue::MessageList(
                items
                    .iter()
                    .filter_map(Value::as_document)
                    .map(|doc| decode_document(doc, nested, layout))
                    .collect(),
            )
        }
        _ => return None,
    };
    Some(decoded)
}
