//! Document store contract.

use protodoc_codec::UpdateDirective;
use protodoc_core::Document;

use crate::error::StoreError;

/// A schemaless store of tag-keyed documents addressed by an identity
/// string.
///
/// Implementations are shared between request handlers, so they must be
/// `Send + Sync` and do their own locking.
pub trait DocumentStore: Send + Sync {
    /// Store a new document and return its identity.
    ///
    /// The document must not already carry the identity key.
    fn insert(&self, document: Document) -> Result<String, StoreError>;

    /// Fetch a document, including its identity key.
    fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError>;

    /// Apply `unset`, then `set`, then `pull`. Returns the number of
    /// documents matched (0 or 1).
    ///
    /// Pull indexes address the array as stored before the call, so
    /// repeating a directive that pulls is not a no-op.
    fn apply_update(&self, id: &str, directive: &UpdateDirective) -> Result<u64, StoreError>;

    /// Returns the number of documents deleted (0 or 1).
    fn delete(&self, id: &str) -> Result<u64, StoreError>;

    fn list(&self) -> Result<Vec<Document>, StoreError>;

    /// Whether `id` is well-formed for this store.
    fn is_valid_id(&self, id: &str) -> bool {
        !id.is_empty()
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for std::sync::Arc<S> {
    fn insert(&self, document: Document) -> Result<String, StoreError> {
        (**self).insert(document)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        (**self).find_by_id(id)
    }

    fn apply_update(&self, id: &str, directive: &UpdateDirective) -> Result<u64, StoreError> {
        (**self).apply_update(id, directive)
    }

    fn delete(&self, id: &str) -> Result<u64, StoreError> {
        (**self).delete(id)
    }

    fn list(&self) -> Result<Vec<Document>, StoreError> {
        (**self).list()
    }

    fn is_valid_id(&self, id: &str) -> bool {
        (**self).is_valid_id(id)
    }
}
