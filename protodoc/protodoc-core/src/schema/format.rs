use std::fmt::{Error, Result, Write as _};

use super::{FieldDescriptor, FieldShape, Schema};

/// Format a schema in a readable style: scalar fields are rendered in one
/// line, message fields are expanded. Nested schemas follow the same rule.
pub fn format_schema(schema: &Schema) -> std::result::Result<String, Error> {
    let mut out = String::new();
    writeln!(out, "message: {}", schema.name())?;
    for field in schema.fields() {
        format_field(field, 0, &mut out)?;
    }
    Ok(out)
}

fn format_field(field: &FieldDescriptor, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    let identity = if field.identity { ", identity: true" } else { "" };
    match field.shape() {
        FieldShape::Scalar(kind) => writeln!(
            out,
            "{pad}{}: {{ tag: {}, type: {}{identity} }}",
            field.name,
            field.tag,
            kind.type_name()
        ),
        FieldShape::RepeatedScalar(kind) => writeln!(
            out,
            "{pad}{}: {{ tag: {}, type: {}, repeated: true }}",
            field.name,
            field.tag,
            kind.type_name()
        ),
        FieldShape::Message(nested) => format_nested(field, nested, false, indent, out),
        FieldShape::RepeatedMessage(nested) => format_nested(field, nested, true, indent, out),
    }
}

fn format_nested(
    field: &FieldDescriptor,
    nested: &Schema,
    repeated: bool,
    indent: usize,
    out: &mut String,
) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}{}:", field.name)?;
    writeln!(out, "{pad}    tag: {}", field.tag)?;
    writeln!(out, "{pad}    type: {}", nested.name())?;
    if repeated {
        writeln!(out, "{pad}    repeated: true")?;
    }
    writeln!(out, "{pad}    fields:")?;
    for child in nested.fields() {
        format_field(child, indent + 8, out)?;
    }
    Ok(())
}
