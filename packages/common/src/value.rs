//! JSON value helpers shared by strategies and mutations.

use serde_json::Value;

use crate::block::BlockData;

/// Loose truthiness used for optional flags and ids stored in block data.
///
/// Missing-ish values (`null`, `false`, `0`, `""`, `"0"`, empty arrays and
/// objects) are falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Truthiness of an optional map entry (absent reads as falsy)
pub fn field_is_truthy(data: &BlockData, key: &str) -> bool {
    data.get(key).map(is_truthy).unwrap_or(false)
}

/// Shallow merge: keys of `overlay` replace keys of `base`
pub fn merge_shallow(base: &BlockData, overlay: &BlockData) -> BlockData {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Recursive merge where `overlay` wins.
///
/// Objects merge key by key and arrays merge index by index; when either
/// side is a scalar the overlay value replaces the base value.
pub fn merge_recursive(base: &BlockData, overlay: &BlockData) -> BlockData {
    let mut merged = base.clone();
    for (key, value) in overlay {
        match merged.get_mut(key) {
            Some(slot) => *slot = replace_value(std::mem::take(slot), value),
            None => {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    merged
}

fn replace_value(base: Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            Value::Object(merge_recursive(&base, overlay))
        }
        (Value::Array(mut base), Value::Array(overlay)) => {
            for (index, item) in overlay.iter().enumerate() {
                if index < base.len() {
                    let existing = std::mem::take(&mut base[index]);
                    base[index] = replace_value(existing, item);
                } else {
                    base.push(item.clone());
                }
            }
            Value::Array(base)
        }
        (_, overlay) => overlay.clone(),
    }
}
