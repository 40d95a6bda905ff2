//! Permissive accessors over stored wire JSON.
//!
//! Stored configs are edited by hand and by older panels, so every accessor
//! coerces what it reasonably can (numbers as strings, `"true"` as a bool)
//! and returns `None` for anything else. Callers keep their template value on
//! `None`.

use serde_json::Value;

use crate::multi_value::split_multi_value;

/// Stand-in for an absent object; every accessor on it yields `None`.
pub static NULL: Value = Value::Null;

pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Returns the value under `key` when it is a JSON object.
pub fn object_at<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| v.is_object())
}

pub fn str_at(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(scalar_to_string)
}

pub fn bool_at(obj: &Value, key: &str) -> Option<bool> {
    match obj.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn u64_at(obj: &Value, key: &str) -> Option<u64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn i64_at(obj: &Value, key: &str) -> Option<i64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads a number-or-range field as the form string: `100`, `"100-200"` and
/// `{"from": 100, "to": 200}` are all accepted.
pub fn range_at(obj: &Value, key: &str) -> Option<String> {
    let value = obj.get(key)?;
    if let Some(s) = scalar_to_string(value) {
        return Some(s);
    }
    let from = str_at(value, "from")?;
    match str_at(value, "to") {
        Some(to) if to != from => Some(format!("{from}-{to}")),
        _ => Some(from),
    }
}

/// Reads a list of strings; a bare string is split like a form multi-value.
pub fn string_list_at(obj: &Value, key: &str) -> Option<Vec<String>> {
    match obj.get(key)? {
        Value::Array(items) => Some(items.iter().filter_map(scalar_to_string).collect()),
        Value::String(s) => Some(split_multi_value(s)),
        _ => None,
    }
}

pub fn array_at<'a>(obj: &'a Value, key: &str) -> Option<&'a [Value]> {
    obj.get(key)?.as_array().map(Vec::as_slice)
}

/// Overwrites `slot` only when a value was read.
pub fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
