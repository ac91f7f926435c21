use protodoc_core::{Document, FieldMask, KeyLayout, Message, Schema, SchemaRef};

use crate::{
    decode::decode_document, encode::encode_message, error::MaskError,
    translate::{MaskTarget, translate_entries}, update::{UpdateDirective, build_directive},
};

/// What the encoder puts in place of repeated-field elements that a mask
/// excludes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexPolicy {
    /// Excluded elements are dropped; later elements shift down.
    #[default]
    Compact,
    /// Excluded elements become [`Value::Hole`](protodoc_core::Value::Hole)
    /// so every remaining element keeps its original index.
    PreserveHoles,
}

/// The codec bound to a [`KeyLayout`].
///
/// Stateless apart from the layout; every method only reads its inputs.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    layout: KeyLayout,
}

impl Codec {
    pub fn new(layout: KeyLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &KeyLayout {
        &self.layout
    }

    /// Encode the fields present on `message`.
    ///
    /// With a mask, a field is emitted only when the mask names it or a path
    /// below it, and repeated-field elements only when the mask names the
    /// element or a path below it. Without a mask every present field is
    /// emitted.
    pub fn encode(&self, message: &Message, mask: Option<&FieldMask>, policy: IndexPolicy) -> Document {
        encode_message(message, mask, policy, &self.layout)
    }

    /// Rebuild a message from a stored document.
    ///
    /// Keys that are neither the identity key nor a known tag key are
    /// ignored, as are values whose shape does not fit the field. Holes are
    /// skipped.
    pub fn decode(&self, document: &Document, schema: &SchemaRef) -> Message {
        decode_document(document, schema, &self.layout)
    }

    /// Resolve every mask entry to a storage path.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError`] for entries that index a non-repeated field,
    /// address a repeated field without an index, descend into a scalar, or
    /// name the identity field.
    pub fn translate_mask(&self, schema: &Schema, mask: &FieldMask) -> Result<Vec<MaskTarget>, MaskError> {
        translate_entries(schema, mask, &self.layout)
    }

    /// Turn a partial message and its mask into an [`UpdateDirective`].
    ///
    /// # Errors
    ///
    /// Returns [`MaskError`] if the mask cannot be translated.
    pub fn build_update(&self, message: &Message, mask: &FieldMask) -> Result<UpdateDirective, MaskError> {
        build_directive(self, message, mask)
    }
}
