//! Message → document.

use protodoc_core::{Document, FieldMask, FieldValue, KeyLayout, Message, Value};

use crate::codec::IndexPolicy;

pub(crate) fn encode_message(
    message: &Message,
    mask: Option<&FieldMask>,
    policy: IndexPolicy,
    layout: &KeyLayout,
) -> Document {
    let mut doc = Document::new();

    for (field, value) in message.iter() {
        if mask.is_some_and(|m| !m.includes_field(&field.name)) {
            continue;
        }
        let name = field.name.as_str();
        let encoded = match value {
            FieldValue::Scalar(s) => Value::Scalar(s.clone()),
            FieldValue::Message(nested) => {
                let sub_mask = mask.and_then(|m| m.sub_mask(name));
                Value::Document(encode_message(nested, sub_mask.as_ref(), policy, layout))
            }
            FieldValue::ScalarList(items) => Value::Array(encode_elements(
                items,
                name,
                mask,
                policy,
                |item, _| Value::Scalar(item.clone()),
            )),
            FieldValue::MessageList(items) => Value::Array(encode_elements(
                items,
                name,
                mask,
                policy,
                |item, sub_mask| {
                    Value::Document(encode_message(item, sub_mask.as_ref(), policy, layout))
                },
            )),
        };

        let key = if field.identity {
            layout.identity_key().to_string()
        } else {
            layout.tag_key(field.tag)
        };
        doc.insert(key, encoded);
    }

    doc
}

/// Encode the elements of repeated field `name`, filtering by `mask`.
/// `encode_one` receives the element's own sub-mask (`None` = unrestricted).
fn encode_elements<T>(
    items: &[T],
    name: &str,
    mask: Option<&FieldMask>,
    policy: IndexPolicy,
    encode_one: impl Fn(&T, Option<FieldMask>) -> Value,
) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match mask {
            None => out.push(encode_one(item, None)),
            Some(m) if m.includes_element(name, i) => {
                out.push(encode_one(item, m.element_sub_mask(name, i)));
            }
            Some(_) => {
                if policy == IndexPolicy::PreserveHoles {
                    out.push(Value::Hole);
                }
            }
        }
    }
    out
}
