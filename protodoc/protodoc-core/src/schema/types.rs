use std::{
    collections::HashMap,
    fmt::{Display, Formatter, Result},
    sync::Arc,
};

/// Shared handle to a built [`Schema`].
///
/// Nested message kinds refer to their schema through this handle. A schema
/// can only reference schemas that were built before it, so the nesting
/// graph cannot contain cycles.
pub type SchemaRef = Arc<Schema>;

/// Scalar leaf types. Enum values are carried as their `i32` number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
    String,
    Bytes,
    Enum,
}

impl ScalarKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::String => "string",
            ScalarKind::Bytes => "bytes",
            ScalarKind::Enum => "enum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cardinality {
    #[default]
    Singular,
    Repeated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Scalar(ScalarKind),
    Message(SchemaRef),
}

/// Closed view of a field combining its cardinality and kind.
///
/// Every recursive walk over messages and documents dispatches on this.
#[derive(Debug, Clone, Copy)]
pub enum FieldShape<'a> {
    Scalar(ScalarKind),
    Message(&'a Schema),
    RepeatedScalar(ScalarKind),
    RepeatedMessage(&'a Schema),
}

impl FieldShape<'_> {
    pub fn is_repeated(&self) -> bool {
        matches!(
            self,
            FieldShape::RepeatedScalar(_) | FieldShape::RepeatedMessage(_)
        )
    }

    pub fn describe(&self) -> String {
        match self {
            FieldShape::Scalar(kind) => kind.type_name().to_string(),
            FieldShape::Message(schema) => format!("message {}", schema.name()),
            FieldShape::RepeatedScalar(kind) => format!("repeated {}", kind.type_name()),
            FieldShape::RepeatedMessage(schema) => format!("repeated message {}", schema.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub tag: u32,
    pub name: String,
    pub cardinality: Cardinality,
    pub kind: FieldKind,
    /// Maps to the document store's identity key instead of a tag key.
    pub identity: bool,
}

impl FieldDescriptor {
    pub fn scalar(tag: u32, name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            tag,
            name: name.into(),
            cardinality: Cardinality::Singular,
            kind: FieldKind::Scalar(kind),
            identity: false,
        }
    }

    pub fn message(tag: u32, name: impl Into<String>, schema: SchemaRef) -> Self {
        Self {
            tag,
            name: name.into(),
            cardinality: Cardinality::Singular,
            kind: FieldKind::Message(schema),
            identity: false,
        }
    }

    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::Repeated;
        self
    }

    pub fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    pub fn is_repeated(&self) -> bool {
        self.cardinality == Cardinality::Repeated
    }

    pub fn shape(&self) -> FieldShape<'_> {
        match (&self.kind, self.cardinality) {
            (FieldKind::Scalar(k), Cardinality::Singular) => FieldShape::Scalar(*k),
            (FieldKind::Scalar(k), Cardinality::Repeated) => FieldShape::RepeatedScalar(*k),
            (FieldKind::Message(s), Cardinality::Singular) => FieldShape::Message(s.as_ref()),
            (FieldKind::Message(s), Cardinality::Repeated) => FieldShape::RepeatedMessage(s.as_ref()),
        }
    }

    /// Nested schema for message-typed fields.
    pub fn message_schema(&self) -> Option<&SchemaRef> {
        match &self.kind {
            FieldKind::Message(s) => Some(s),
            FieldKind::Scalar(_) => None,
        }
    }
}

/// A message type: an ordered table of [`FieldDescriptor`]s.
///
/// Construct with [`SchemaBuilder`](super::SchemaBuilder).
#[derive(Debug, Clone)]
pub struct Schema {
    pub(super) name: String,
    pub(super) fields: Vec<FieldDescriptor>,
    pub(super) by_tag: HashMap<u32, usize>,
    pub(super) by_name: HashMap<String, usize>,
    pub(super) identity: Option<usize>,
}

impl Schema {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_by_tag(&self, tag: u32) -> Option<&FieldDescriptor> {
        self.by_tag.get(&tag).map(|&i| &self.fields[i])
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    pub fn identity_field(&self) -> Option<&FieldDescriptor> {
        self.identity.map(|i| &self.fields[i])
    }

    /// Length of the longest chain of nested message references, counting
    /// this schema as depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .fields
            .iter()
            .filter_map(|f| f.message_schema())
            .map(|s| s.depth())
            .max()
            .unwrap_or(0)
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = super::format_schema(self)?;
        f.write_str(&text)
    }
}
