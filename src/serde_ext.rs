//! Lenient deserializers for identifiers the backend sends as either
//! strings (Mongo-style `_id`) or numbers.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes an optional identifier, accepting strings and numbers.
pub(crate) fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(id_from_value(&Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null)))
}

/// Extracts an identifier from a JSON value, if it is a string or a number.
pub(crate) fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "opt_id")]
        id: Option<String>,
    }

    #[test]
    fn test_opt_id_accepts_strings_and_numbers() {
        let from_str: Holder = serde_json::from_value(json!({"id": "abc"})).unwrap();
        assert_eq!(from_str.id.as_deref(), Some("abc"));

        let from_num: Holder = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(from_num.id.as_deref(), Some("42"));

        let missing: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(missing.id.is_none());

        let null: Holder = serde_json::from_value(json!({"id": null})).unwrap();
        assert!(null.id.is_none());
    }
}
