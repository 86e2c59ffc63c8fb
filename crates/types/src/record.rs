//! Flat product records as handed over by the ingestion layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flat mapping of field name to raw value.
///
/// No schema is enforced: keys may be missing, extra keys are carried along,
/// and values may be strings, numbers, booleans or null. Every accessor
/// degrades to an empty string instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builds a record from a JSON value. Non-object values yield an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the display text of a field, trimmed. Missing keys and nulls yield `""`.
    pub fn text(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Returns the field as a number when it is numeric or a numeric string.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().trim_start_matches('$').parse().ok(),
            _ => None,
        }
    }

    pub fn has(&self, key: &str) -> bool {
        !self.text(key).is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_tolerates_missing_and_null() {
        let record = Record::from_value(json!({"A": null, "B": " x ", "C": 3.5, "D": true}));
        assert_eq!(record.text("A"), "");
        assert_eq!(record.text("B"), "x");
        assert_eq!(record.text("C"), "3.5");
        assert_eq!(record.text("D"), "true");
        assert_eq!(record.text("missing"), "");
    }

    #[test]
    fn test_number_parses_strings_and_prices() {
        let record = Record::new().with("Price", "$12.50").with("Weight", 3.5);
        assert_eq!(record.number("Price"), Some(12.5));
        assert_eq!(record.number("Weight"), Some(3.5));
        assert_eq!(record.number("missing"), None);
    }

    #[test]
    fn test_non_object_value_is_empty_record() {
        assert!(Record::from_value(json!([1, 2])).is_empty());
    }
}
