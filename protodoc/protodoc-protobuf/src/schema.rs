//! Convert protobuf message descriptors into [`Schema`]s.

use std::collections::HashMap;

use prost_reflect::{DescriptorPool, FieldDescriptor as ProtoField, Kind, MessageDescriptor};
use protodoc_core::{FieldDescriptor, ScalarKind, SchemaBuilder, SchemaError, SchemaRef};

use crate::ConvertError;

/// Look up `schema_name` in a serialized `FileDescriptorSet`.
pub fn parse_message_descriptor(
    schema_name: &str,
    schema_data: &[u8],
) -> Result<MessageDescriptor, ConvertError> {
    let pool = DescriptorPool::decode(schema_data).map_err(|e| ConvertError::SchemaParse {
        schema_name: schema_name.to_string(),
        source: Box::new(e),
    })?;
    pool.get_message_by_name(schema_name)
        .ok_or_else(|| ConvertError::MessageNotFound {
            schema_name: schema_name.to_string(),
        })
}

/// Derive a schema for `schema_name` from serialized `FileDescriptorSet`
/// bytes, optionally marking the top-level field `identity` as the identity
/// field.
pub fn protobuf_descriptor_to_schema(
    schema_name: &str,
    schema_data: &[u8],
    identity: Option<&str>,
) -> Result<SchemaRef, ConvertError> {
    let desc = parse_message_descriptor(schema_name, schema_data)?;
    schema_from_descriptor_with_identity(&desc, identity)
}

/// Derive a schema without an identity field.
pub fn schema_from_descriptor(desc: &MessageDescriptor) -> Result<SchemaRef, ConvertError> {
    schema_from_descriptor_with_identity(desc, None)
}

/// Derive a schema, marking the top-level field named `identity` (a
/// singular string such as `id` or `name`) as the identity field.
///
/// Nested message types are converted once and shared. Recursive message
/// types are rejected with [`SchemaError::Cyclic`].
pub fn schema_from_descriptor_with_identity(
    desc: &MessageDescriptor,
    identity: Option<&str>,
) -> Result<SchemaRef, ConvertError> {
    if let Some(name) = identity {
        if desc.get_field_by_name(name).is_none() {
            return Err(ConvertError::IdentityNotFound {
                schema: desc.full_name().to_string(),
                field: name.to_string(),
            });
        }
    }
    SchemaConverter::default().convert(desc, identity)
}

#[derive(Default)]
struct SchemaConverter {
    /// Full names of the messages currently being converted, outermost first.
    visiting: Vec<String>,
    built: HashMap<String, SchemaRef>,
}

impl SchemaConverter {
    fn convert(
        &mut self,
        desc: &MessageDescriptor,
        identity: Option<&str>,
    ) -> Result<SchemaRef, ConvertError> {
        let full_name = desc.full_name().to_string();
        if let Some(start) = self.visiting.iter().position(|n| *n == full_name) {
            let mut cycle = self.visiting[start..].to_vec();
            cycle.push(full_name.clone());
            return Err(SchemaError::Cyclic {
                schema: full_name,
                cycle,
            }
            .into());
        }

        self.visiting.push(full_name.clone());
        let mut builder = SchemaBuilder::new(full_name);
        for fd in desc.fields() {
            let mut field = self.convert_field(desc, &fd)?;
            if identity == Some(fd.name()) {
                field = field.identity();
            }
            builder.push(field);
        }
        self.visiting.pop();

        Ok(builder.build()?)
    }

    fn convert_field(
        &mut self,
        parent: &MessageDescriptor,
        fd: &ProtoField,
    ) -> Result<FieldDescriptor, ConvertError> {
        if fd.is_map() {
            return Err(ConvertError::UnsupportedMap {
                schema: parent.full_name().to_string(),
                field: fd.name().to_string(),
            });
        }

        let field = match fd.kind() {
            Kind::Message(nested) => {
                let schema = self.nested(&nested)?;
                FieldDescriptor::message(fd.number(), fd.name(), schema)
            }
            kind => FieldDescriptor::scalar(fd.number(), fd.name(), scalar_kind(&kind)),
        };

        Ok(if fd.is_list() { field.repeated() } else { field })
    }

    fn nested(&mut self, desc: &MessageDescriptor) -> Result<SchemaRef, ConvertError> {
        if let Some(schema) = self.built.get(desc.full_name()) {
            return Ok(schema.clone());
        }
        let schema = self.convert(desc, None)?;
        self.built
            .insert(desc.full_name().to_string(), schema.clone());
        Ok(schema)
    }
}

fn scalar_kind(kind: &Kind) -> ScalarKind {
    match kind {
        Kind::Double => ScalarKind::F64,
        Kind::Float => ScalarKind::F32,
        Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 => ScalarKind::I32,
        Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => ScalarKind::I64,
        Kind::Uint32 | Kind::Fixed32 => ScalarKind::U32,
        Kind::Uint64 | Kind::Fixed64 => ScalarKind::U64,
        Kind::Bool => ScalarKind::Bool,
        Kind::String => ScalarKind::String,
        Kind::Bytes => ScalarKind::Bytes,
        Kind::Enum(_) => ScalarKind::Enum,
        Kind::Message(_) => unreachable!("message kinds are converted as nested schemas"),
    }
}
