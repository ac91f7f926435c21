//! In-process [`DocumentStore`].

use std::{
    collections::BTreeMap,
    sync::{
        RwLock,
        atomic::{AtomicU64, Ordering},
    },
};

use protodoc_codec::UpdateDirective;
use protodoc_core::{Document, KeyLayout, Segment, Value};
use tracing::debug;

use crate::{error::StoreError, store::DocumentStore};

const ID_LEN: usize = 24;

/// Keeps documents in a locked map. Identities are 24 lowercase hex digits,
/// allocated in increasing order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    layout: KeyLayout,
    documents: RwLock<BTreeMap<String, Document>>,
    last_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `layout`'s identity key instead of the default `_id`.
    pub fn with_layout(layout: KeyLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let docs = self.documents.read().map_err(|_| StoreError::Poisoned)?;
        Ok(docs.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn next_id(&self) -> String {
        let n = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{n:0width$x}", width = ID_LEN)
    }
}

impl DocumentStore for MemoryStore {
    fn insert(&self, mut document: Document) -> Result<String, StoreError> {
        let key = self.layout.identity_key();
        if document.contains_key(key) {
            return Err(StoreError::IdentityPresent {
                key: key.to_string(),
            });
        }
        let id = self.next_id();
        document.insert_first(key, id.as_str());

        let mut docs = self.documents.write().map_err(|_| StoreError::Poisoned)?;
        docs.insert(id.clone(), document);
        debug!(id = %id, "inserted document");
        Ok(id)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let docs = self.documents.read().map_err(|_| StoreError::Poisoned)?;
        Ok(docs.get(id).cloned())
    }

    fn apply_update(&self, id: &str, directive: &UpdateDirective) -> Result<u64, StoreError> {
        let mut docs = self.documents.write().map_err(|_| StoreError::Poisoned)?;
        let Some(doc) = docs.get_mut(id) else {
            return Ok(0);
        };
        apply_directive(doc, directive);
        debug!(
            id,
            set = directive.set.len(),
            unset = directive.unset.len(),
            pull = directive.pull.len(),
            "applied update"
        );
        Ok(1)
    }

    fn delete(&self, id: &str) -> Result<u64, StoreError> {
        let mut docs = self.documents.write().map_err(|_| StoreError::Poisoned)?;
        Ok(u64::from(docs.remove(id).is_some()))
    }

    fn list(&self) -> Result<Vec<Document>, StoreError> {
        let docs = self.documents.read().map_err(|_| StoreError::Poisoned)?;
        Ok(docs.values().cloned().collect())
    }

    fn is_valid_id(&self, id: &str) -> bool {
        id.len() == ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

/// Apply `unset`, `set` and `pull` in that order.
///
/// Clearing first lets a rewritten container drop the stored fields the
/// update does not carry. `set` creates missing intermediate documents and
/// array slots. `pull` removes the addressed slots from the highest index
/// down, so every index refers to the array as it was before the request.
///
/// A `set` past the end of an array pads the gap with holes. The decoder
/// skips holes, so a client reading the document back sees the later
/// elements at lower indexes than the ones stored here until the padding
/// is filled or pulled.
///
/// A second application of the same `pull` removes whatever has moved into
/// the addressed slots since; only `set` and `unset` are idempotent.
pub(crate) fn apply_directive(doc: &mut Document, directive: &UpdateDirective) {
    for path in &directive.unset {
        unset_path(doc, path.segments());
    }
    for (path, value) in &directive.set {
        set_in_document(doc, path.segments(), Value::Scalar(value.clone()));
    }
    for (path, indexes) in &directive.pull {
        if let Some(Value::Array(items)) = lookup_mut(doc, path.segments()) {
            for &i in indexes.iter().rev() {
                if i < items.len() {
                    items.remove(i);
                }
            }
        }
    }
}

fn set_in_document(doc: &mut Document, segments: &[Segment], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    let key = head.to_string();
    if rest.is_empty() {
        doc.insert(key, value);
        return;
    }
    if !doc.contains_key(&key) {
        doc.insert(key.as_str(), Value::Hole);
    }
    if let Some(child) = doc.get_mut(&key) {
        set_in_value(child, rest, value);
    }
}

fn set_in_value(target: &mut Value, segments: &[Segment], value: Value) {
    match segments.first() {
        None => *target = value,
        Some(Segment::Index(i)) => {
            let mut items = match std::mem::replace(target, Value::Hole) {
                Value::Array(items) => items,
                _ => Vec::new(),
            };
            if items.len() <= *i {
                items.resize(*i + 1, Value::Hole);
            }
            set_in_value(&mut items[*i], &segments[1..], value);
            *target = Value::Array(items);
        }
        Some(Segment::Field(_)) => {
            let mut doc = match std::mem::replace(target, Value::Hole) {
                Value::Document(doc) => doc,
                _ => Document::new(),
            };
            set_in_document(&mut doc, segments, value);
            *target = Value::Document(doc);
        }
    }
}

fn unset_path(doc: &mut Document, segments: &[Segment]) {
    let Some((last, parent)) = segments.split_last() else {
        return;
    };
    if parent.is_empty() {
        doc.remove(&last.to_string());
        return;
    }
    match (lookup_mut(doc, parent), last) {
        (Some(Value::Document(d)), seg) => {
            d.remove(&seg.to_string());
        }
        (Some(Value::Array(items)), Segment::Index(i)) => {
            if let Some(slot) = items.get_mut(*i) {
                *slot = Value::Hole;
            }
        }
        _ => {}
    }
}

fn lookup_mut<'a>(doc: &'a mut Document, segments: &[Segment]) -> Option<&'a mut Value> {
    let (head, rest) = segments.split_first()?;
    let mut current = doc.get_mut(&head.to_string())?;
    for segment in rest {
        current = match (current, segment) {
            (Value::Document(d), seg) => d.get_mut(&seg.to_string())?,
            (Value::Array(items), Segment::Index(i)) => items.get_mut(*i)?,
            _ => return None,
        };
    }
    Some(current)
}
