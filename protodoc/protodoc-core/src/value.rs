//! Scalar values and the generic tag-keyed document tree.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::Arc,
};

use crate::{error::ValueTypeError, schema::ScalarKind};

/// A leaf value carried by a message field or a document entry.
/// All types are explicit; no lossy conversions.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(Arc<str>),
    Bytes(Arc<[u8]>),
}

impl Scalar {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    pub fn bytes(b: impl AsRef<[u8]>) -> Self {
        Self::Bytes(Arc::from(b.as_ref()))
    }

    pub fn try_bool(&self) -> Result<bool, ValueTypeError> {
        match self {
            Scalar::Bool(v) => Ok(*v),
            _ => Err(self.type_mismatch("Bool")),
        }
    }

    pub fn try_i32(&self) -> Result<i32, ValueTypeError> {
        match self {
            Scalar::I32(v) => Ok(*v),
            _ => Err(self.type_mismatch("I32")),
        }
    }

    pub fn try_i64(&self) -> Result<i64, ValueTypeError> {
        match self {
            Scalar::I64(v) => Ok(*v),
            _ => Err(self.type_mismatch("I64")),
        }
    }

    pub fn try_u32(&self) -> Result<u32, ValueTypeError> {
        match self {
            Scalar::U32(v) => Ok(*v),
            _ => Err(self.type_mismatch("U32")),
        }
    }

    pub fn try_u64(&self) -> Result<u64, ValueTypeError> {
        match self {
            Scalar::U64(v) => Ok(*v),
            _ => Err(self.type_mismatch("U64")),
        }
    }

    pub fn try_f32(&self) -> Result<f32, ValueTypeError> {
        match self {
            Scalar::F32(v) => Ok(*v),
            _ => Err(self.type_mismatch("F32")),
        }
    }

    pub fn try_f64(&self) -> Result<f64, ValueTypeError> {
        match self {
            Scalar::F64(v) => Ok(*v),
            _ => Err(self.type_mismatch("F64")),
        }
    }

    pub fn try_str(&self) -> Result<&str, ValueTypeError> {
        match self {
            Scalar::String(v) => Ok(v.as_ref()),
            _ => Err(self.type_mismatch("String")),
        }
    }

    pub fn try_bytes(&self) -> Result<&[u8], ValueTypeError> {
        match self {
            Scalar::Bytes(v) => Ok(v.as_ref()),
            _ => Err(self.type_mismatch("Bytes")),
        }
    }

    pub fn type_mismatch(&self, expected: impl Into<String>) -> ValueTypeError {
        ValueTypeError::new(expected, self.variant_name())
    }

    /// Whether this value can be stored in a field of `kind` without conversion.
    pub fn fits(&self, kind: ScalarKind) -> bool {
        matches!(
            (self, kind),
            (Scalar::Bool(_), ScalarKind::Bool)
                | (Scalar::I32(_), ScalarKind::I32 | ScalarKind::Enum)
                | (Scalar::I64(_), ScalarKind::I64)
                | (Scalar::U32(_), ScalarKind::U32)
                | (Scalar::U64(_), ScalarKind::U64)
                | (Scalar::F32(_), ScalarKind::F32)
                | (Scalar::F64(_), ScalarKind::F64)
                | (Scalar::String(_), ScalarKind::String)
                | (Scalar::Bytes(_), ScalarKind::Bytes)
        )
    }

    /// Convert a stored value into `kind` when no information is lost.
    ///
    /// Document stores commonly widen or narrow integer types (there is no
    /// unsigned 64-bit integer in BSON, for instance), so the decoder accepts
    /// any integer that is in range for the target field. Floats convert in
    /// both directions; narrowing a double rounds to the nearest `f32`.
    pub fn coerce(&self, kind: ScalarKind) -> Option<Scalar> {
        if self.fits(kind) {
            return Some(self.clone());
        }
        match kind {
            ScalarKind::I32 | ScalarKind::Enum => self.as_i128()?.try_into().ok().map(Scalar::I32),
            ScalarKind::I64 => self.as_i128()?.try_into().ok().map(Scalar::I64),
            ScalarKind::U32 => self.as_i128()?.try_into().ok().map(Scalar::U32),
            ScalarKind::U64 => self.as_i128()?.try_into().ok().map(Scalar::U64),
            ScalarKind::F64 => match self {
                Scalar::F32(v) => Some(Scalar::F64(f64::from(*v))),
                _ => None,
            },
            // Stores without single precision hand `float` fields back as doubles.
            ScalarKind::F32 => match self {
                Scalar::F64(v) => Some(Scalar::F32(*v as f32)),
                _ => None,
            },
            _ => None,
        }
    }

    fn as_i128(&self) -> Option<i128> {
        match self {
            Scalar::I32(v) => Some(i128::from(*v)),
            Scalar::I64(v) => Some(i128::from(*v)),
            Scalar::U32(v) => Some(i128::from(*v)),
            Scalar::U64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "Bool",
            Scalar::I32(_) => "I32",
            Scalar::I64(_) => "I64",
            Scalar::U32(_) => "U32",
            Scalar::U64(_) => "U64",
            Scalar::F32(_) => "F32",
            Scalar::F64(_) => "F64",
            Scalar::String(_) => "String",
            Scalar::Bytes(_) => "Bytes",
        }
    }
}

/// Strings render verbatim, bytes as lowercase hex.
impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::I32(v) => write!(f, "{v}"),
            Scalar::I64(v) => write!(f, "{v}"),
            Scalar::U32(v) => write!(f, "{v}"),
            Scalar::U64(v) => write!(f, "{v}"),
            Scalar::F32(v) => write!(f, "{v}"),
            Scalar::F64(v) => write!(f, "{v}"),
            Scalar::String(v) => f.write_str(v),
            Scalar::Bytes(v) => v.iter().try_for_each(|b| write!(f, "{b:02x}")),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::string(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(Arc::from(value))
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::I32(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::I64(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::U32(value)
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::U64(value)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::F32(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::F64(value)
    }
}

/// A node of the generic document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Document(Document),
    Array(Vec<Value>),
    /// A repeated-field slot excluded by a field mask. Only ever appears as
    /// an [`Value::Array`] element.
    Hole,
}

impl Value {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_hole(&self) -> bool {
        matches!(self, Value::Hole)
    }
}

macro_rules! value_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(value.into())
                }
            }
        )*
    };
}

value_from_scalar!(&str, String, bool, i32, i64, u32, u64, f32, f64);

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Document(value)
    }
}

/// Insertion-ordered mapping from document keys to [`Value`]s.
///
/// Entry order is the order in which the encoder visited the fields, which
/// keeps flattening deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document(Vec<(String, Value)>);

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert `value` under `key`, replacing an existing entry in place.
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Like [`Document::insert`], but a new entry is placed first.
    pub fn insert_first(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.0.insert(0, (key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let pos = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (k, v) in iter {
            doc.insert(k, v);
        }
        doc
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
