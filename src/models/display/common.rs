//! Helpers for reading free-form attribute maps

use std::collections::BTreeMap;

use serde_json::Value;

use crate::output::formatters::NONE;

/// Follow a dotted path (`usr.email`) through nested attribute objects.
pub fn lookup<'a>(attrs: Option<&'a BTreeMap<String, Value>>, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = attrs?.get(parts.next()?)?;
    for part in parts {
        current = current.get(part)?;
    }
    Some(current)
}

/// String value at `path`, or the placeholder.
pub fn lookup_str(attrs: Option<&BTreeMap<String, Value>>, path: &str) -> String {
    match lookup(attrs, path) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => NONE.to_string(),
    }
}

/// The value, or the placeholder when absent or empty.
pub fn or_none(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NONE.to_string(),
    }
}
