//! "Omit if empty" rules for the Xray wire model.
//!
//! Wire structs reference these predicates from `skip_serializing_if`, so a
//! field that holds nothing never reaches the serialized config.
//! [`is_empty_value`] applies the same rule to untyped wire values.

use serde_json::Value;

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn is_blank_opt(s: &Option<String>) -> bool {
    s.as_deref().is_none_or(is_blank)
}

pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => is_blank(s),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
