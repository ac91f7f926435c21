//! Error types for the protobuf bridge.

use protodoc_core::{MessageError, SchemaError};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Schema data (a serialized `FileDescriptorSet`) could not be parsed.
    #[error("failed to parse schema '{schema_name}': {source}")]
    SchemaParse {
        schema_name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("message descriptor not found: '{schema_name}'")]
    MessageNotFound { schema_name: String },

    /// Map fields have no counterpart in the schema model.
    #[error("message '{schema}': map field '{field}' is not supported")]
    UnsupportedMap { schema: String, field: String },

    #[error("message '{schema}': identity field '{field}' not found")]
    IdentityNotFound { schema: String, field: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Message(#[from] MessageError),

    #[error("message '{schema}' has no field with tag {tag}")]
    UnknownTag { schema: String, tag: u32 },

    #[error("message '{schema}': value does not fit field '{field}': {detail}")]
    SetField {
        schema: String,
        field: String,
        detail: String,
    },
}
