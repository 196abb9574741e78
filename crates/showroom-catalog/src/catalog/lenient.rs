//! Field deserializers that default instead of failing.
//!
//! Source records are hand-edited JSON, so a single field of the wrong type
//! must not cost the whole record. Each helper reads the raw `Value` and
//! yields `None` when it cannot be used.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
    Value::deserialize(deserializer)
}

/// A number, also accepted as a numeric string such as `"19.99"`.
pub(crate) fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(as_number(&raw(deserializer)?))
}

pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Value::Null => None,
        other => {
            debug!(value = %other, "Ignoring non-numeric field");
            None
        }
    }
}

/// A string. Numbers and booleans are rendered as text.
pub(crate) fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(as_text(raw(deserializer)?))
}

fn as_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        other => {
            debug!(value = %other, "Ignoring non-text field");
            None
        }
    }
}

/// A list of strings. A lone string becomes a one-element list; entries
/// that are not text are dropped.
pub(crate) fn strings<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match raw(deserializer)? {
        Value::Array(items) => Some(items.into_iter().filter_map(as_text).collect()),
        Value::String(s) => Some(vec![s]),
        _ => None,
    })
}

/// A JSON object, in document order.
pub(crate) fn object<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Map<String, Value>>, D::Error> {
    Ok(match raw(deserializer)? {
        Value::Object(map) => Some(map),
        _ => None,
    })
}

/// A JSON array.
pub(crate) fn array<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<Value>>, D::Error> {
    Ok(match raw(deserializer)? {
        Value::Array(items) => Some(items),
        _ => None,
    })
}

/// Any structured value that parses as `T`.
pub(crate) fn parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = raw(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value)
        .map_err(|e| debug!(error = %e, "Ignoring unreadable field"))
        .ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_strings() {
        assert_eq!(as_number(&json!("19.99")), Some(19.99));
        assert_eq!(as_number(&json!(" 7 ")), Some(7.0));
        assert_eq!(as_number(&json!("free")), None);
        assert_eq!(as_number(&json!("NaN")), None);
        assert_eq!(as_number(&json!([1])), None);
    }

    #[test]
    fn test_text_from_scalars() {
        assert_eq!(as_text(json!(42)), Some("42".to_string()));
        assert_eq!(as_text(json!(true)), Some("true".to_string()));
        assert_eq!(as_text(json!({"a": 1})), None);
    }
}
