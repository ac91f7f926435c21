//! Codec between typed [`Message`]s and tag-keyed [`Document`]s.
//!
//! Five operations make up the codec:
//! - [`encode`]: message to document, optionally restricted by a field mask.
//! - [`decode`]: document to message, ignoring keys the schema does not know.
//! - [`flatten`]: document to `(storage path, scalar)` leaf pairs.
//! - [`translate_mask`]: field-name mask to storage paths.
//! - [`build_update`]: message plus mask to a set / unset / pull
//!   [`UpdateDirective`].
//!
//! The free functions use [`KeyLayout::default`]; use [`Codec`] for a custom
//! key layout.
//!
//! # Typical Flow
//! ```rust
//! use protodoc_codec::{build_update, decode, encode, IndexPolicy};
//! use protodoc_core::{FieldDescriptor, FieldMask, Message, ScalarKind, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new("Part")
//!     .field(FieldDescriptor::scalar(1, "description", ScalarKind::String))
//!     .build()
//!     .unwrap();
//! let part = Message::new(schema.clone())
//!     .with("description", "RES 10K 0203")
//!     .unwrap();
//!
//! let doc = encode(&part, None, IndexPolicy::Compact);
//! assert_eq!(decode(&doc, &schema), part);
//!
//! let mask = FieldMask::parse(["description"]).unwrap();
//! let update = build_update(&part, &mask).unwrap();
//! assert_eq!(update.set.len(), 1);
//! ```

mod codec;
mod decode;
mod encode;
mod error;
mod flatten;
mod translate;
mod update;

pub use codec::{Codec, IndexPolicy};
pub use error::MaskError;
pub use flatten::flatten;
pub use translate::MaskTarget;
pub use update::UpdateDirective;

use protodoc_core::{Document, FieldMask, Message, Schema, SchemaRef};
#[doc(no_inline)]
pub use protodoc_core::KeyLayout;

/// Encode `message` with the default key layout. See [`Codec::encode`].
pub fn encode(message: &Message, mask: Option<&FieldMask>, policy: IndexPolicy) -> Document {
    Codec::default().encode(message, mask, policy)
}

/// Decode `document` with the default key layout. See [`Codec::decode`].
pub fn decode(document: &Document, schema: &SchemaRef) -> Message {
    Codec::default().decode(document, schema)
}

/// Translate `mask` with the default key layout. See [`Codec::translate_mask`].
pub fn translate_mask(schema: &Schema, mask: &FieldMask) -> Result<Vec<MaskTarget>, MaskError> {
    Codec::default().translate_mask(schema, mask)
}

/// Build an update directive with the default key layout. See
/// [`Codec::build_update`].
pub fn build_update(message: &Message, mask: &FieldMask) -> Result<UpdateDirective, MaskError> {
    Codec::default().build_update(message, mask)
}
