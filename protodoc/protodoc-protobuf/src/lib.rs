//! Protobuf bridge for protodoc.
//!
//! Derives [`Schema`](protodoc_core::Schema)s from `prost-reflect` message
//! descriptors and converts between [`DynamicMessage`](prost_reflect::DynamicMessage)
//! and [`Message`](protodoc_core::Message), so protobuf types can be stored
//! through the protodoc codec.

mod error;
mod message;
mod schema;

pub use error::ConvertError;
pub use message::{message_from_dynamic, message_to_dynamic};
pub use schema::{
    parse_message_descriptor, protobuf_descriptor_to_schema, schema_from_descriptor,
    schema_from_descriptor_with_identity,
};
