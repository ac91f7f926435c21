//! Key naming inside stored documents.

use crate::error::LayoutError;

const DEFAULT_TAG_PREFIX: &str = "_";
const DEFAULT_IDENTITY_KEY: &str = "_id";

/// How field identities map to document keys.
///
/// Every non-identity field is stored under its tag number with a fixed
/// non-digit prefix (`_3`); the identity field is stored under the store's
/// native identity key (`_id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    tag_prefix: String,
    identity_key: String,
}

impl KeyLayout {
    /// # Errors
    ///
    /// Returns [`LayoutError`] if the prefix is empty or ends with a digit,
    /// or if the identity key would itself parse as a tag key.
    pub fn new(
        tag_prefix: impl Into<String>,
        identity_key: impl Into<String>,
    ) -> Result<Self, LayoutError> {
        let tag_prefix = tag_prefix.into();
        let identity_key = identity_key.into();

        match tag_prefix.chars().last() {
            None => return Err(LayoutError::EmptyPrefix),
            Some(c) if c.is_ascii_digit() => return Err(LayoutError::DigitPrefix(tag_prefix)),
            Some(_) => {}
        }
        if identity_key.is_empty() {
            return Err(LayoutError::EmptyIdentity);
        }

        let layout = Self {
            tag_prefix,
            identity_key,
        };
        if layout.parse_tag_key(&layout.identity_key).is_some() {
            return Err(LayoutError::IdentityCollision(layout.identity_key));
        }
        Ok(layout)
    }

    pub fn tag_prefix(&self) -> &str {
        &self.tag_prefix
    }

    pub fn identity_key(&self) -> &str {
        &self.identity_key
    }

    pub fn is_identity_key(&self, key: &str) -> bool {
        key == self.identity_key
    }

    pub fn tag_key(&self, tag: u32) -> String {
        format!("{}{tag}", self.tag_prefix)
    }

    /// Reverse of [`KeyLayout::tag_key`].
    ///
    /// Returns `None` for keys of any other shape, including zero tags and
    /// digits with leading zeros, so each tag has exactly one key.
    pub fn parse_tag_key(&self, key: &str) -> Option<u32> {
        let digits = key.strip_prefix(self.tag_prefix.as_str())?;
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        digits.parse().ok()
    }
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self {
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
            identity_key: DEFAULT_IDENTITY_KEY.to_string(),
        }
    }
}
