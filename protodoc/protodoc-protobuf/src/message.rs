//! Convert between protobuf `DynamicMessage`s and [`Message`]s.

use std::sync::Arc;

use prost_reflect::{DynamicMessage, Kind, MessageDescriptor, ReflectMessage, Value as ProtoValue};
use protodoc_core::{FieldDescriptor, FieldValue, Message, Scalar, SchemaRef};

use crate::ConvertError;

/// Convert a dynamic message into a [`Message`] of `schema`.
///
/// Only fields the protobuf message reports as present are copied, so
/// proto3 scalars at their default value and empty repeated fields stay
/// absent. Fields unknown to `schema` are ignored.
pub fn message_from_dynamic(
    msg: &DynamicMessage,
    schema: &SchemaRef,
) -> Result<Message, ConvertError> {
    let desc = msg.descriptor();
    let mut message = Message::new(schema.clone());

    for field in schema.fields() {
        let Some(fd) = desc.get_field(field.tag) else {
            continue;
        };
        if !msg.has_field(&fd) {
            continue;
        }
        let value = msg.get_field(&fd);
        if let Some(converted) = field_from_proto(field, &value)? {
            message.set_by_tag(field.tag, converted)?;
        }
    }

    Ok(message)
}

fn field_from_proto(
    field: &FieldDescriptor,
    value: &ProtoValue,
) -> Result<Option<FieldValue>, ConvertError> {
    let converted = match (value, field.message_schema()) {
        (ProtoValue::Message(m), Some(schema)) => {
            Some(FieldValue::Message(message_from_dynamic(m, schema)?))
        }
        (ProtoValue::List(items), Some(schema)) => Some(FieldValue::MessageList(
            items
                .iter()
                .filter_map(|v| v.as_message())
                .map(|m| message_from_dynamic(m, schema))
                .collect::<Result<Vec<_>, _>>()?,
        )),
        (ProtoValue::List(items), None) => Some(FieldValue::ScalarList(
            items.iter().filter_map(scalar_from_proto).collect(),
        )),
        (other, None) => scalar_from_proto(other).map(FieldValue::Scalar),
        _ => None,
    };
    Ok(converted)
}

fn scalar_from_proto(value: &ProtoValue) -> Option<Scalar> {
    let scalar = match value {
        ProtoValue::Bool(v) => Scalar::Bool(*v),
        ProtoValue::I32(v) => Scalar::I32(*v),
        ProtoValue::I64(v) => Scalar::I64(*v),
        ProtoValue::U32(v) => Scalar::U32(*v),
        ProtoValue::U64(v) => Scalar::U64(*v),
        ProtoValue::F32(v) => Scalar::F32(*v),
        ProtoValue::F64(v) => Scalar::F64(*v),
        ProtoValue::String(s) => Scalar::String(Arc::from(s.as_str())),
        ProtoValue::Bytes(b) => Scalar::Bytes(Arc::from(b.as_ref())),
        ProtoValue::EnumNumber(n) => Scalar::I32(*n),
        ProtoValue::Message(_) | ProtoValue::List(_) | ProtoValue::Map(_) => return None,
    };
    Some(scalar)
}

/// Convert a [`Message`] into a dynamic message of type `desc`.
///
/// Fields are matched by tag number.
pub fn message_to_dynamic(
    message: &Message,
    desc: &MessageDescriptor,
) -> Result<DynamicMessage, ConvertError> {
    let mut dm = DynamicMessage::new(desc.clone());

    for (field, value) in message.iter() {
        let fd = desc
            .get_field(field.tag)
            .ok_or_else(|| ConvertError::UnknownTag {
                schema: desc.full_name().to_string(),
                tag: field.tag,
            })?;
        let kind = fd.kind();
        let proto = match value {
            FieldValue::Scalar(s) => scalar_to_proto(s, &kind),
            FieldValue::Message(m) => nested_to_proto(m, &kind, &field.name)?,
            FieldValue::ScalarList(items) => ProtoValue::List(
                items.iter().map(|s| scalar_to_proto(s, &kind)).collect(),
            ),
            FieldValue::MessageList(items) => ProtoValue::List(
                items
                    .iter()
                    .map(|m| nested_to_proto(m, &kind, &field.name))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };
        dm.try_set_field(&fd, proto)
            .map_err(|e| ConvertError::SetField {
                schema: desc.full_name().to_string(),
                field: fd.name().to_string(),
                detail: e.to_string(),
            })?;
    }

    Ok(dm)
}

fn nested_to_proto(message: &Message, kind: &Kind, field: &str) -> Result<ProtoValue, ConvertError> {
    match kind {
        Kind::Message(nested) => Ok(ProtoValue::Message(message_to_dynamic(message, nested)?)),
        other => Err(ConvertError::SetField {
            schema: message.schema().name().to_string(),
            field: field.to_string(),
            detail: format!("expected a message kind, found {other:?}"),
        }),
    }
}

fn scalar_to_proto(scalar: &Scalar, kind: &Kind) -> ProtoValue {
    match scalar {
        Scalar::I32(n) if matches!(kind, Kind::Enum(_)) => ProtoValue::EnumNumber(*n),
        Scalar::Bool(v) => ProtoValue::Bool(*v),
        Scalar::I32(v) => ProtoValue::I32(*v),
        Scalar::I64(v) => ProtoValue::I64(*v),
        Scalar::U32(v) => ProtoValue::U32(*v),
        Scalar::U64(v) => ProtoValue::U64(*v),
        Scalar::F32(v) => ProtoValue::F32(*v),
        Scalar::F64(v) => ProtoValue::F64(*v),
        Scalar::String(s) => ProtoValue::String(s.to_string()),
        Scalar::Bytes(b) => ProtoValue::Bytes(bytes::Bytes::copy_from_slice(b)),
    }
}
