//! Typed message instances.

use std::{collections::BTreeMap, sync::Arc};

use crate::{
    error::MessageError,
    schema::{FieldDescriptor, FieldShape, Schema, SchemaRef},
    value::Scalar,
};

/// Value of one present field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Scalar),
    Message(Message),
    ScalarList(Vec<Scalar>),
    MessageList(Vec<Message>),
}

impl FieldValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&Message> {
        match self {
            FieldValue::Message(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_scalar_list(&self) -> Option<&[Scalar]> {
        match self {
            FieldValue::ScalarList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_message_list(&self) -> Option<&[Message]> {
        match self {
            FieldValue::MessageList(items) => Some(items),
            _ => None,
        }
    }

    fn is_empty_list(&self) -> bool {
        match self {
            FieldValue::ScalarList(items) => items.is_empty(),
            FieldValue::MessageList(items) => items.is_empty(),
            _ => false,
        }
    }

    fn describe(&self) -> String {
        match self {
            FieldValue::Scalar(s) => s.variant_name().to_string(),
            FieldValue::Message(m) => format!("message {}", m.schema().name()),
            FieldValue::ScalarList(_) => "scalar list".to_string(),
            FieldValue::MessageList(_) => "message list".to_string(),
        }
    }

    fn fits(&self, shape: FieldShape<'_>) -> bool {
        match (self, shape) {
            (FieldValue::Scalar(s), FieldShape::Scalar(kind)) => s.fits(kind),
            (FieldValue::Message(m), FieldShape::Message(schema)) => same_schema(m, schema),
            (FieldValue::ScalarList(items), FieldShape::RepeatedScalar(kind)) => {
                items.iter().all(|s| s.fits(kind))
            }
            (FieldValue::MessageList(items), FieldShape::RepeatedMessage(schema)) => {
                items.iter().all(|m| same_schema(m, schema))
            }
            _ => false,
        }
    }
}

fn same_schema(message: &Message, schema: &Schema) -> bool {
    std::ptr::eq(message.schema.as_ref(), schema) || message.schema.as_ref() == schema
}

impl From<Scalar> for FieldValue {
    fn from(value: Scalar) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Message> for FieldValue {
    fn from(value: Message) -> Self {
        FieldValue::Message(value)
    }
}

impl From<Vec<Scalar>> for FieldValue {
    fn from(value: Vec<Scalar>) -> Self {
        FieldValue::ScalarList(value)
    }
}

impl From<Vec<Message>> for FieldValue {
    fn from(value: Vec<Message>) -> Self {
        FieldValue::MessageList(value)
    }
}

macro_rules! field_value_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Scalar(value.into())
                }
            }
        )*
    };
}

field_value_from_scalar!(&str, String, bool, i32, i64, u32, u64, f32, f64);

/// An instance of a [`Schema`]: the set of fields that are present.
///
/// Unset fields are absent; there are no null placeholders. Setting an
/// empty list clears the field.
#[derive(Debug, Clone)]
pub struct Message {
    schema: SchemaRef,
    fields: BTreeMap<u32, FieldValue>,
}

impl Message {
    pub fn new(schema: SchemaRef) -> Self {
        Self {
            schema,
            fields: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// # Errors
    ///
    /// [`MessageError::UnknownField`] if the schema has no such field,
    /// [`MessageError::ShapeMismatch`] if the value does not fit it.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), MessageError> {
        let tag = self.descriptor_by_name(name)?.tag;
        self.set_by_tag(tag, value)
    }

    pub fn set_by_tag(&mut self, tag: u32, value: impl Into<FieldValue>) -> Result<(), MessageError> {
        let value = value.into();
        let field = self.descriptor_by_tag(tag)?;
        if !value.fits(field.shape()) {
            return Err(MessageError::ShapeMismatch {
                schema: self.schema.name().to_string(),
                field: field.name.clone(),
                expected: field.shape().describe(),
                actual: value.describe(),
            });
        }
        if value.is_empty_list() {
            self.fields.remove(&tag);
        } else {
            self.fields.insert(tag, value);
        }
        Ok(())
    }

    /// Builder-style [`Message::set`].
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Result<Self, MessageError> {
        self.set(name, value)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        let field = self.schema.field_by_name(name)?;
        self.fields.get(&field.tag)
    }

    pub fn get_by_tag(&self, tag: u32) -> Option<&FieldValue> {
        self.fields.get(&tag)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn clear(&mut self, name: &str) -> Option<FieldValue> {
        let field = self.schema.field_by_name(name)?;
        self.fields.remove(&field.tag)
    }

    pub fn clear_by_tag(&mut self, tag: u32) -> Option<FieldValue> {
        self.fields.remove(&tag)
    }

    /// Value of the identity field, if the schema has one and it is set.
    pub fn identity(&self) -> Option<&str> {
        let field = self.schema.identity_field()?;
        self.fields.get(&field.tag)?.as_scalar()?.try_str().ok()
    }

    /// # Errors
    ///
    /// [`MessageError::NoIdentityField`] if the schema declares none.
    pub fn set_identity(&mut self, id: impl AsRef<str>) -> Result<(), MessageError> {
        let tag = self.identity_tag()?;
        self.fields
            .insert(tag, FieldValue::Scalar(Scalar::string(id)));
        Ok(())
    }

    pub fn clear_identity(&mut self) -> Option<FieldValue> {
        let tag = self.schema.identity_field()?.tag;
        self.fields.remove(&tag)
    }

    /// Present fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldDescriptor, &FieldValue)> {
        self.schema
            .fields()
            .iter()
            .filter_map(|field| self.fields.get(&field.tag).map(|value| (field, value)))
    }

    fn identity_tag(&self) -> Result<u32, MessageError> {
        self.schema
            .identity_field()
            .map(|f| f.tag)
            .ok_or_else(|| MessageError::NoIdentityField {
                schema: self.schema.name().to_string(),
            })
    }

    fn descriptor_by_name(&self, name: &str) -> Result<&FieldDescriptor, MessageError> {
        self.schema
            .field_by_name(name)
            .ok_or_else(|| MessageError::UnknownField {
                schema: self.schema.name().to_string(),
                field: name.to_string(),
            })
    }

    fn descriptor_by_tag(&self, tag: u32) -> Result<&FieldDescriptor, MessageError> {
        self.schema
            .field_by_tag(tag)
            .ok_or_else(|| MessageError::UnknownTag {
                schema: self.schema.name().to_string(),
                tag,
            })
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.schema, &other.schema) || self.schema == other.schema)
            && self.fields == other.fields
    }
}
