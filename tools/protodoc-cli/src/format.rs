use protodoc::{
    codec::UpdateDirective,
    model::{Document, Scalar, Value},
};
use serde_json::{Map, Value as Json, json};

pub fn document_to_json(doc: &Document) -> Json {
    Json::Object(
        doc.iter()
            .map(|(key, value)| (key.to_string(), value_to_json(value)))
            .collect(),
    )
}

/// Holes render as `null`.
fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Scalar(s) => scalar_to_json(s),
        Value::Document(doc) => document_to_json(doc),
        Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
        Value::Hole => Json::Null,
    }
}

fn scalar_to_json(scalar: &Scalar) -> Json {
    match scalar {
        Scalar::Bool(v) => json!(v),
        Scalar::I32(v) => json!(v),
        Scalar::I64(v) => json!(v),
        Scalar::U32(v) => json!(v),
        Scalar::U64(v) => json!(v),
        Scalar::F32(v) => json!(v),
        Scalar::F64(v) => json!(v),
        Scalar::String(v) => json!(&**v),
        Scalar::Bytes(v) => json!(&v[..]),
    }
}

/// Render in document-store update syntax.
///
/// `$unset` may name a container that `$set` rewrites, so apply it first
/// as its own step.
pub fn directive_to_json(directive: &UpdateDirective) -> Json {
    let set: Map<String, Json> = directive
        .set
        .iter()
        .map(|(path, value)| (path.to_string(), scalar_to_json(value)))
        .collect();
    let unset: Map<String, Json> = directive
        .unset
        .iter()
        .map(|path| (path.to_string(), json!("")))
        .collect();
    let pull: Map<String, Json> = directive
        .pull
        .iter()
        .map(|(path, indexes)| (path.to_string(), json!(indexes)))
        .collect();
    json!({ "$set": set, "$unset": unset, "$pull": pull })
}
