//! Schema model: ordered field descriptor tables for message types.

mod builder;
mod format;
mod types;

pub use builder::SchemaBuilder;
pub use format::format_schema;
pub use types::{Cardinality, FieldDescriptor, FieldKind, FieldShape, ScalarKind, Schema, SchemaRef};
