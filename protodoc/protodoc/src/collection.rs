//! Typed catalog collections (parts, part schemas, ...).

use protodoc_codec::{Codec, IndexPolicy};
use protodoc_core::{FieldMask, Message, SchemaRef};
use tracing::{debug, warn};

use crate::{
    error::{CatalogError, StoreError},
    store::DocumentStore,
};

/// Messages of one schema stored in a [`DocumentStore`].
///
/// `name` is the singular resource name used in error messages
/// (`"part"`, `"part schema"`).
pub struct Collection<S> {
    name: String,
    schema: SchemaRef,
    codec: Codec,
    store: S,
}

impl<S: DocumentStore> Collection<S> {
    pub fn new(name: impl Into<String>, schema: SchemaRef, store: S) -> Self {
        Self {
            name: name.into(),
            schema,
            codec: Codec::default(),
            store,
        }
    }

    /// Use `codec` instead of the default key layout. The store must use the
    /// same identity key.
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store `message` and return its new identity. Any identity already set
    /// on `message` is ignored.
    pub fn create(&self, message: &Message) -> Result<String, CatalogError> {
        self.check_schema(message)?;
        let mut message = message.clone();
        message.clear_identity();
        let document = self.codec.encode(&message, None, IndexPolicy::Compact);
        let id = self.store.insert(document).map_err(|e| self.store_failure("create", e))?;
        debug!(collection = %self.name, id = %id, "created");
        Ok(id)
    }

    /// Fetch and decode. The identity field, if the schema has one, is set
    /// to `id`.
    pub fn get(&self, id: &str) -> Result<Message, CatalogError> {
        self.check_id(id)?;
        let document = self
            .store
            .find_by_id(id)
            .map_err(|e| self.store_failure("get", e))?
            .ok_or_else(|| self.not_found(id))?;
        Ok(self.codec.decode(&document, &self.schema))
    }

    /// Apply the fields of `message` selected by `mask`: masked fields that
    /// are present are written, masked fields that are absent are removed.
    pub fn update(&self, id: &str, message: &Message, mask: &FieldMask) -> Result<(), CatalogError> {
        self.check_id(id)?;
        self.check_schema(message)?;
        let directive = self.codec.build_update(message, mask)?;
        let matched = self
            .store
            .apply_update(id, &directive)
            .map_err(|e| self.store_failure("update", e))?;
        if matched == 0 {
            return Err(self.not_found(id));
        }
        debug!(collection = %self.name, id, "updated");
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<(), CatalogError> {
        self.check_id(id)?;
        let deleted = self
            .store
            .delete(id)
            .map_err(|e| self.store_failure("delete", e))?;
        if deleted == 0 {
            return Err(self.not_found(id));
        }
        debug!(collection = %self.name, id, "deleted");
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<Message>, CatalogError> {
        let documents = self.store.list().map_err(|e| self.store_failure("list", e))?;
        Ok(documents
            .iter()
            .map(|doc| self.codec.decode(doc, &self.schema))
            .collect())
    }

    fn check_id(&self, id: &str) -> Result<(), CatalogError> {
        if self.store.is_valid_id(id) {
            Ok(())
        } else {
            Err(CatalogError::InvalidId { id: id.to_string() })
        }
    }

    fn check_schema(&self, message: &Message) -> Result<(), CatalogError> {
        if message.schema().as_ref() == self.schema.as_ref() {
            return Ok(());
        }
        Err(CatalogError::WrongSchema {
            collection: self.name.clone(),
            expected: self.schema.name().to_string(),
            actual: message.schema().name().to_string(),
        })
    }

    fn not_found(&self, id: &str) -> CatalogError {
        CatalogError::NotFound {
            collection: self.name.clone(),
            id: id.to_string(),
        }
    }

    fn store_failure(&self, operation: &str, error: StoreError) -> CatalogError {
        warn!(collection = %self.name, operation, %error, "document store failure");
        CatalogError::Store(error)
    }
}
