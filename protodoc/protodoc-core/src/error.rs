//! Error types for the core model.

/// A [`Scalar`](crate::Scalar) accessor was called on a value of another kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: &'static str,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: &'static str) -> Self {
        Self {
            expected: expected.into(),
            actual,
        }
    }
}

/// Returned by [`SchemaBuilder::build`](crate::SchemaBuilder::build) when the
/// field table is not a valid schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("schema '{schema}': field '{field}' has tag 0; tags must be positive")]
    ZeroTag { schema: String, field: String },

    #[error("schema '{schema}': tag {tag} is used by both '{first}' and '{second}'")]
    DuplicateTag {
        schema: String,
        tag: u32,
        first: String,
        second: String,
    },

    #[error("schema '{schema}': field name '{field}' is declared more than once")]
    DuplicateName { schema: String, field: String },

    #[error("schema '{schema}': field with tag {tag} has an empty name")]
    EmptyName { schema: String, tag: u32 },

    #[error("schema '{schema}': both '{first}' and '{second}' are marked as identity")]
    MultipleIdentity {
        schema: String,
        first: String,
        second: String,
    },

    #[error("schema '{schema}': identity field '{field}' must be a singular string")]
    InvalidIdentity { schema: String, field: String },

    /// The nesting graph of message types contains a cycle.
    #[error("schema '{schema}' is part of a nesting cycle: {}", cycle.join(" -> "))]
    Cyclic { schema: String, cycle: Vec<String> },
}

/// Returned when a value does not fit the field it is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("message '{schema}' has no field named '{field}'")]
    UnknownField { schema: String, field: String },

    #[error("message '{schema}' has no field with tag {tag}")]
    UnknownTag { schema: String, tag: u32 },

    #[error("message '{schema}' declares no identity field")]
    NoIdentityField { schema: String },

    #[error("field '{field}' of '{schema}' expects {expected}, got {actual}")]
    ShapeMismatch {
        schema: String,
        field: String,
        expected: String,
        actual: String,
    },
}

/// Returned by [`FieldPath::parse`](crate::FieldPath::parse).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("path '{path}' has an empty segment at position {position}")]
    EmptySegment { path: String, position: usize },
}

/// Returned by [`KeyLayout::new`](crate::KeyLayout::new).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("tag prefix must not be empty")]
    EmptyPrefix,

    #[error("tag prefix '{0}' must not end with a digit")]
    DigitPrefix(String),

    #[error("identity key must not be empty")]
    EmptyIdentity,

    #[error("identity key '{0}' collides with the tag key format")]
    IdentityCollision(String),
}
