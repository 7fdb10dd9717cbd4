//! Lenient accessors over untyped catalog JSON.
//!
//! Catalog responses are probed rather than deserialized: a missing or
//! oddly-typed key must degrade to a sentinel, never abort the record.

use std::borrow::Cow;

use serde_json::Value;

/// Stand-in for a missing nested object, so lookups can continue and
/// bottom out in sentinels.
pub(crate) static NULL: Value = Value::Null;

/// Returns `value` as text when it is a string, number, or bool.
///
/// Numbers and bools are rendered as their JSON text (ids are sometimes
/// numeric). `null`, arrays, and objects yield `None`.
pub(crate) fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Reads `key` from `object` as text, falling back to `default`.
pub(crate) fn text_or<'a>(object: &'a Value, key: &str, default: &'a str) -> Cow<'a, str> {
    object
        .get(key)
        .and_then(as_text)
        .unwrap_or(Cow::Borrowed(default))
}

/// Reads `key` from `object` as an array slice; anything else is empty.
pub(crate) fn array_at<'a>(object: &'a Value, key: &str) -> &'a [Value] {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Returns the value when it is an object with at least one key.
pub(crate) fn non_empty_object(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| v.as_object().is_some_and(|map| !map.is_empty()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn as_text_renders_numbers_and_bools() {
        assert_eq!(as_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(as_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(as_text(&json!("abc")).as_deref(), Some("abc"));
    }

    #[test]
    fn as_text_rejects_containers_and_null() {
        assert!(as_text(&Value::Null).is_none());
        assert!(as_text(&json!([1])).is_none());
        assert!(as_text(&json!({"a": 1})).is_none());
    }

    #[test]
    fn text_or_falls_back_on_null() {
        let obj = json!({"name": null});
        assert_eq!(text_or(&obj, "name", "No Name"), "No Name");
    }

    #[test]
    fn array_at_non_array_is_empty() {
        let obj = json!({"products": "none"});
        assert!(array_at(&obj, "products").is_empty());
        assert!(array_at(&obj, "missing").is_empty());
    }

    #[test]
    fn non_empty_object_filters_empty_maps() {
        let empty = json!({});
        let full = json!({"k": 1});
        assert!(non_empty_object(Some(&empty)).is_none());
        assert!(non_empty_object(Some(&json!([1]))).is_none());
        assert!(non_empty_object(Some(&full)).is_some());
        assert!(non_empty_object(None).is_none());
    }
}
