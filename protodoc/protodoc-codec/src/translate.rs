//! Field-name mask → storage paths.

use protodoc_core::{FieldMask, FieldPath, FieldShape, KeyLayout, Schema, Segment};
use tracing::trace;

use crate::error::MaskError;

/// A storage path addressed by one mask entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskTarget {
    pub path: FieldPath,
    /// The path ends in an element index of a repeated field: when the
    /// element is absent from the message, the whole element is removed
    /// rather than cleared.
    pub repeated_element: bool,
}

impl MaskTarget {
    fn field(path: FieldPath) -> Self {
        Self {
            path,
            repeated_element: false,
        }
    }

    fn element(path: FieldPath) -> Self {
        Self {
            path,
            repeated_element: true,
        }
    }
}

pub(crate) fn translate_entries(
    schema: &Schema,
    mask: &FieldMask,
    layout: &KeyLayout,
) -> Result<Vec<MaskTarget>, MaskError> {
    let mut out = Vec::with_capacity(mask.len());
    for entry in mask.iter() {
        let resolver = Resolver { entry, layout };
        resolver.resolve(schema, entry.segments(), &FieldPath::root(), &mut out)?;
    }
    Ok(out)
}

/// Resolves the segments of a single mask entry; `entry` is kept for error
/// messages.
struct Resolver<'a> {
    entry: &'a FieldPath,
    layout: &'a KeyLayout,
}

impl Resolver<'_> {
    fn resolve(
        &self,
        schema: &Schema,
        segments: &[Segment],
        prefix: &FieldPath,
        out: &mut Vec<MaskTarget>,
    ) -> Result<(), MaskError> {
        let Some((head, rest)) = segments.split_first() else {
            return Err(MaskError::EmptyPath);
        };
        let name = match head {
            Segment::Field(name) => name,
            Segment::Index(index) => {
                return Err(MaskError::UnexpectedIndex {
                    path: self.entry.to_string(),
                    index: *index,
                });
            }
        };
        let Some(field) = schema.field_by_name(name) else {
            trace!(schema = schema.name(), field = name.as_str(), "skipping unknown mask field");
            return Ok(());
        };
        if field.identity {
            return Err(MaskError::IdentityField {
                path: self.entry.to_string(),
                field: field.name.clone(),
            });
        }

        let tag_path = prefix.child(self.layout.tag_key(field.tag));
        match field.shape() {
            FieldShape::Scalar(_) if rest.is_empty() => out.push(MaskTarget::field(tag_path)),
            FieldShape::Scalar(_) => return Err(self.scalar_has_no_children(&field.name)),
            FieldShape::Message(_) if rest.is_empty() => out.push(MaskTarget::field(tag_path)),
            FieldShape::Message(nested) => self.resolve(nested, rest, &tag_path, out)?,
            FieldShape::RepeatedScalar(_) | FieldShape::RepeatedMessage(_) => {
                let Some((Segment::Index(index), after)) = rest.split_first() else {
                    return Err(MaskError::MissingIndex {
                        path: self.entry.to_string(),
                        field: field.name.clone(),
                    });
                };
                let element_path = tag_path.index(*index);
                match field.shape() {
                    _ if after.is_empty() => out.push(MaskTarget::element(element_path)),
                    FieldShape::RepeatedMessage(nested) => {
                        self.resolve(nested, after, &element_path, out)?
                    }
                    _ => return Err(self.scalar_has_no_children(&field.name)),
                }
            }
        }
        Ok(())
    }

    fn scalar_has_no_children(&self, field: &str) -> MaskError {
        MaskError::ScalarHasNoChildren {
            path: self.entry.to_string(),
            field: field.to_string(),
        }
    }
}
