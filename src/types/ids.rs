// src/types/ids.rs
use super::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Identifier of a collected post.
///
/// Search payloads carry ids either as strings or as bare integers. Both
/// normalize to the same decimal string so that deduplication compares
/// logical ids, not JSON representations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Parse an id from its textual form.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField("id"));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(ValidationError::InvalidId(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Interpret a JSON value as an id: non-empty strings and integers qualify.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::parse(s).ok(),
            Value::Number(n) if n.is_u64() || n.is_i64() => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// Returns the id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ItemId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        ItemId::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid item id: {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_from_string_and_number_agree() {
        let from_string = ItemId::from_json(&json!("1790000000000000001")).unwrap();
        let from_number = ItemId::from_json(&json!(1790000000000000001u64)).unwrap();
        assert_eq!(from_string, from_number);
        assert_eq!(from_string.as_str(), "1790000000000000001");
    }

    #[test]
    fn test_invalid_ids() {
        assert!(ItemId::parse("").is_err());
        assert!(ItemId::parse("   ").is_err());
        assert!(ItemId::parse("12\n34").is_err());
        assert!(ItemId::from_json(&json!(null)).is_none());
        assert!(ItemId::from_json(&json!(1.5)).is_none());
        assert!(ItemId::from_json(&json!({"id": 1})).is_none());
    }

    #[test]
    fn test_serializes_as_string() {
        let id: ItemId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("42"));
    }
}
