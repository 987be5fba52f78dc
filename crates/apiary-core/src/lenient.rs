//! Lenient deserialization for optional categorical fields
//!
//! Form data may carry values this version does not know. An unrecognized
//! literal is treated as unanswered (and logged) instead of failing the whole
//! observation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => match serde_json::from_value::<T>(raw.clone()) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "Unrecognized categorical value, treating as unanswered");
                Ok(None)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "snake_case")]
    enum Level {
        High,
        Low,
    }

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "super::deserialize")]
        level: Option<Level>,
    }

    #[test]
    fn test_known_value() {
        let form: Form = serde_json::from_str(r#"{"level": "high"}"#).unwrap();
        assert_eq!(form.level, Some(Level::High));
    }

    #[test]
    fn test_unknown_value_is_unanswered() {
        let form: Form = serde_json::from_str(r#"{"level": "hgih"}"#).unwrap();
        assert_eq!(form.level, None);
        let form: Form = serde_json::from_str(r#"{"level": 7}"#).unwrap();
        assert_eq!(form.level, None);
    }

    #[test]
    fn test_missing_or_null() {
        let form: Form = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(form.level, None);
        let form: Form = serde_json::from_str(r#"{"level": null}"#).unwrap();
        assert_eq!(form.level, None);
    }
}
