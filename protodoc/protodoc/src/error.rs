//! Error types for stores and collections.

use std::fmt::{Display, Formatter, Result as FmtResult};

use protodoc_codec::MaskError;

/// Errors produced by [`DocumentStore`](crate::DocumentStore) implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Inserted documents get their identity from the store.
    #[error("document already carries identity key '{key}'")]
    IdentityPresent { key: String },

    #[error("document store lock poisoned")]
    Poisoned,

    /// Failure reported by an external storage backend.
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

/// Status reported to RPC clients, named after the gRPC codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    InvalidArgument,
    NotFound,
    Internal,
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            StatusCode::InvalidArgument => "INVALID_ARGUMENT",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::Internal => "INTERNAL",
        })
    }
}

/// Errors produced by [`Collection`](crate::Collection).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid id '{id}'")]
    InvalidId { id: String },

    #[error("no such {collection}: '{id}'")]
    NotFound { collection: String, id: String },

    #[error("collection '{collection}' stores '{expected}' messages, got '{actual}'")]
    WrongSchema {
        collection: String,
        expected: String,
        actual: String,
    },

    #[error("invalid update mask: {0}")]
    InvalidMask(#[from] MaskError),

    #[error("document store failure: {0}")]
    Store(#[from] StoreError),
}

impl CatalogError {
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::InvalidId { .. }
            | CatalogError::WrongSchema { .. }
            | CatalogError::InvalidMask(_) => StatusCode::InvalidArgument,
            CatalogError::NotFound { .. } => StatusCode::NotFound,
            CatalogError::Store(StoreError::IdentityPresent { .. }) => StatusCode::InvalidArgument,
            CatalogError::Store(_) => StatusCode::Internal,
        }
    }
}
