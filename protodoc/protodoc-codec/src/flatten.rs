//! Document → flat `(path, scalar)` pairs.

use protodoc_core::{Document, FieldPath, Scalar, Value};

/// Flatten `document` into its scalar leaves, in document order.
///
/// Document keys become path segments, array positions become index
/// segments (`_2.1._1`). Holes and empty containers contribute nothing.
pub fn flatten(document: &Document) -> Vec<(FieldPath, Scalar)> {
    let mut out = Vec::new();
    flatten_document(document, &FieldPath::root(), &mut out);
    out
}

fn flatten_document(document: &Document, path: &FieldPath, out: &mut Vec<(FieldPath, Scalar)>) {
    for (key, value) in document.iter() {
        flatten_value(value, &path.child(key), out);
    }
}

fn flatten_value(value: &Value, path: &FieldPath, out: &mut Vec<(FieldPath, Scalar)>) {
    match value {
        Value::Scalar(s) => out.push((path.clone(), s.clone())),
        Value::Document(doc) => flatten_document(doc, path, out),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_value(item, &path.index(i), out);
            }
        }
        Value::Hole => {}
    }
}
