//! Catalog document storage on top of the protodoc codec.
//!
//! [`Collection`] stores typed messages in a [`DocumentStore`], encoding them
//! to tag-keyed documents on write, decoding on read, and turning field-mask
//! updates into set / unset / pull directives. [`MemoryStore`] is the
//! in-process store implementation.

mod collection;
mod error;
mod memory;
mod store;

pub use collection::Collection;
pub use error::{CatalogError, StatusCode, StoreError};
pub use memory::MemoryStore;
pub use protodoc_codec as codec;
pub use protodoc_core as model;
#[cfg(feature = "protobuf")]
pub use protodoc_protobuf as protobuf;
pub use store::DocumentStore;
