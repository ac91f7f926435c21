use std::{collections::HashMap, sync::Arc};

use super::types::{Cardinality, FieldDescriptor, FieldKind, ScalarKind, Schema, SchemaRef};
use crate::error::SchemaError;

/// Collects field descriptors and validates them into a [`Schema`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn push(&mut self, field: FieldDescriptor) {
        self.fields.push(field);
    }

    /// Validate the field table.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] for zero or duplicate tags, empty or duplicate
    /// names, and identity fields that are not a single singular string.
    pub fn build(self) -> Result<SchemaRef, SchemaError> {
        let schema = self.name;
        let mut by_tag = HashMap::with_capacity(self.fields.len());
        let mut by_name = HashMap::with_capacity(self.fields.len());
        let mut identity: Option<usize> = None;

        for (i, field) in self.fields.iter().enumerate() {
            if field.tag == 0 {
                return Err(SchemaError::ZeroTag {
                    schema,
                    field: field.name.clone(),
                });
            }
            if field.name.is_empty() {
                return Err(SchemaError::EmptyName {
                    schema,
                    tag: field.tag,
                });
            }
            if let Some(&prev) = by_tag.get(&field.tag) {
                let first: &FieldDescriptor = &self.fields[prev];
                return Err(SchemaError::DuplicateTag {
                    schema,
                    tag: field.tag,
                    first: first.name.clone(),
                    second: field.name.clone(),
                });
            }
            if by_name.contains_key(&field.name) {
                return Err(SchemaError::DuplicateName {
                    schema,
                    field: field.name.clone(),
                });
            }
            if field.identity {
                if let Some(prev) = identity {
                    return Err(SchemaError::MultipleIdentity {
                        schema,
                        first: self.fields[prev].name.clone(),
                        second: field.name.clone(),
                    });
                }
                let is_string = matches!(field.kind, FieldKind::Scalar(ScalarKind::String));
                if !is_string || field.cardinality != Cardinality::Singular {
                    return Err(SchemaError::InvalidIdentity {
                        schema,
                        field: field.name.clone(),
                    });
                }
                identity = Some(i);
            }
            by_tag.insert(field.tag, i);
            by_name.insert(field.name.clone(), i);
        }

        Ok(Arc::new(Schema {
            name: schema,
            fields: self.fields,
            by_tag,
            by_name,
            identity,
        }))
    }
}
