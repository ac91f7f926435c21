//! Encoding-agnostic core types for `protodoc`.
//!
//! This crate provides the schema model ([`Schema`] / [`FieldDescriptor`]),
//! typed [`Message`] instances, the generic tag-keyed [`Document`] tree and
//! the dotted [`FieldPath`] algebra shared by every codec operation.

mod error;
mod layout;
mod mask;
mod message;
mod path;
mod schema;
mod value;

pub use error::{LayoutError, MessageError, PathError, SchemaError, ValueTypeError};
pub use layout::KeyLayout;
pub use mask::FieldMask;
pub use message::{FieldValue, Message};
pub use path::{FieldPath, Segment};
pub use schema::{
    Cardinality, FieldDescriptor, FieldKind, FieldShape, ScalarKind, Schema, SchemaBuilder,
    SchemaRef, format_schema,
};
pub use value::{Document, Scalar, Value};
