//! Partial message + field mask → set / unset / pull directive.

use std::collections::{BTreeMap, BTreeSet};

use protodoc_core::{FieldMask, FieldPath, Message, Scalar};
use tracing::debug;

use crate::{
    codec::{Codec, IndexPolicy},
    error::MaskError,
    flatten::flatten,
};

/// A masked partial update, expressed as the three primitive document-store
/// operations.
///
/// A resolved mask path lands in exactly one of the three parts. A masked
/// container whose leaves are being written appears in `unset` as well as
/// through those leaves in `set`; stores apply `unset` before `set`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateDirective {
    /// Leaf paths to overwrite, in document order.
    pub set: Vec<(FieldPath, Scalar)>,
    /// Scalar or sub-document paths to remove.
    pub unset: BTreeSet<FieldPath>,
    /// Repeated-field paths from which elements are removed outright, with
    /// the element indexes the mask addressed.
    pub pull: BTreeMap<FieldPath, BTreeSet<usize>>,
}

impl UpdateDirective {
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.unset.is_empty() && self.pull.is_empty()
    }

    pub fn set_value(&self, path: &FieldPath) -> Option<&Scalar> {
        self.set.iter().find(|(p, _)| p == path).map(|(_, v)| v)
    }

    pub fn pull_paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.pull.keys()
    }
}

pub(crate) fn build_directive(
    codec: &Codec,
    message: &Message,
    mask: &FieldMask,
) -> Result<UpdateDirective, MaskError> {
    let targets = codec.translate_mask(message.schema(), mask)?;
    let document = codec.encode(message, Some(mask), IndexPolicy::PreserveHoles);
    let set = flatten(&document);

    let mut unset = BTreeSet::new();
    let mut pull: BTreeMap<FieldPath, BTreeSet<usize>> = BTreeMap::new();

    for target in targets {
        if set.iter().any(|(p, _)| *p == target.path) {
            continue;
        }
        // A masked container that is being rewritten is cleared first, so
        // stored fields the message does not carry go away.
        if set.iter().any(|(p, _)| p.starts_with(target.path.segments())) {
            unset.insert(target.path);
            continue;
        }
        if target.repeated_element {
            let index = target.path.last().and_then(|s| s.as_index());
            if let (Some(array), Some(index)) = (target.path.parent(), index) {
                pull.entry(array).or_default().insert(index);
            }
        } else {
            unset.insert(target.path);
        }
    }

    debug!(
        schema = message.schema().name(),
        set = set.len(),
        unset = unset.len(),
        pull = pull.len(),
        "built update directive"
    );

    Ok(UpdateDirective { set, unset, pull })
}
