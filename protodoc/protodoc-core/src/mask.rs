//! Field masks: caller-supplied lists of dotted field-name paths.

use crate::{
    error::PathError,
    path::{FieldPath, Segment},
};

/// Ordered list of field-name paths marking which fields of a message are
/// meaningful. Segments addressing a repeated field's element are numeric
/// indexes (`attributes.1.value`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldMask {
    paths: Vec<FieldPath>,
}

impl FieldMask {
    pub fn new(paths: Vec<FieldPath>) -> Self {
        Self { paths }
    }

    /// Parse each entry as a dotted [`FieldPath`].
    ///
    /// # Errors
    ///
    /// Returns the first [`PathError`] encountered.
    pub fn parse<I, S>(paths: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .map(|p| FieldPath::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn paths(&self) -> &[FieldPath] {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldPath> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// A field is selected when an entry names it or lies below it.
    pub fn includes_field(&self, name: &str) -> bool {
        self.paths
            .iter()
            .any(|p| p.first().is_some_and(|s| s.is_field(name)))
    }

    /// An element of a repeated field is selected when an entry names it or
    /// lies below it.
    pub fn includes_element(&self, name: &str, index: usize) -> bool {
        let prefix = element_prefix(name, index);
        self.paths.iter().any(|p| p.starts_with(&prefix))
    }

    /// Mask to apply inside the singular message field `name`.
    ///
    /// `None` means the field is selected as a whole and is encoded without
    /// a mask.
    pub fn sub_mask(&self, name: &str) -> Option<FieldMask> {
        self.nested(&[Segment::Field(name.to_string())])
    }

    /// Mask to apply inside element `index` of the repeated message field
    /// `name`, with both the field and the index segment stripped.
    pub fn element_sub_mask(&self, name: &str, index: usize) -> Option<FieldMask> {
        self.nested(&element_prefix(name, index))
    }

    fn nested(&self, prefix: &[Segment]) -> Option<FieldMask> {
        let mut paths = Vec::new();
        for path in &self.paths {
            match path.strip_prefix(prefix) {
                Some(rest) if rest.is_empty() => return None,
                Some(rest) => paths.push(rest),
                None => {}
            }
        }
        Some(FieldMask::new(paths))
    }
}

impl FromIterator<FieldPath> for FieldMask {
    fn from_iter<I: IntoIterator<Item = FieldPath>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn element_prefix(name: &str, index: usize) -> [Segment; 2] {
    [Segment::Field(name.to_string()), Segment::Index(index)]
}
