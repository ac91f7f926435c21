use thiserror::Error;

/// A field-mask entry that cannot be resolved against the schema.
///
/// Callers should surface this as a client input error. Unknown field names
/// are not an error; they are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaskError {
    #[error("mask contains an empty path")]
    EmptyPath,

    #[error("mask path '{path}': index {index} where a field name is expected")]
    UnexpectedIndex { path: String, index: usize },

    #[error("mask path '{path}': repeated field '{field}' must be followed by an element index")]
    MissingIndex { path: String, field: String },

    #[error("mask path '{path}': field '{field}' is a scalar and has no sub-fields")]
    ScalarHasNoChildren { path: String, field: String },

    #[error("mask path '{path}': identity field '{field}' cannot be updated")]
    IdentityField { path: String, field: String },
}
