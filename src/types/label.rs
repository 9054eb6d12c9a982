// src/types/label.rs
//! The closed set of verdicts a post's main health claim can receive.

use super::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Classification outcome for an item's main health claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    True,
    False,
    Misleading,
    Unverified,
}

impl Label {
    /// Every label, in display order.
    pub const ALL: [Label; 4] = [
        Label::True,
        Label::False,
        Label::Misleading,
        Label::Unverified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::True => "true",
            Label::False => "false",
            Label::Misleading => "misleading",
            Label::Unverified => "unverified",
        }
    }

    /// Parses free-form model output; anything outside the set is `Unverified`.
    pub fn coerce(raw: &str) -> Label {
        raw.parse().unwrap_or(Label::Unverified)
    }
}

impl FromStr for Label {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Label::True),
            "false" => Ok(Label::False),
            "misleading" => Ok(Label::Misleading),
            "unverified" => Ok(Label::Unverified),
            _ => Err(ValidationError::UnknownLabel(s.to_string())),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads an optional label from an artifact file.
///
/// `null`, `false` and blank strings mean "not labeled yet". Strings outside
/// the closed set (hand-edited files, older runs) and any other non-string
/// value are coerced to `Unverified` so that a stray value never stops a
/// stage.
pub fn deserialize_optional_label<'de, D>(deserializer: D) -> Result<Option<Label>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(Label::coerce(&s)),
        _ => Some(Label::Unverified),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" Misleading ".parse::<Label>().unwrap(), Label::Misleading);
        assert_eq!("FALSE".parse::<Label>().unwrap(), Label::False);
        assert!("maybe".parse::<Label>().is_err());
    }

    #[test]
    fn test_coerce_falls_back_to_unverified() {
        assert_eq!(Label::coerce("partly true"), Label::Unverified);
        assert_eq!(Label::coerce(""), Label::Unverified);
        assert_eq!(Label::coerce("true"), Label::True);
    }

    #[derive(Deserialize)]
    struct Labeled {
        #[serde(default, deserialize_with = "deserialize_optional_label")]
        label: Option<Label>,
    }

    fn read_label(json: &str) -> Option<Label> {
        serde_json::from_str::<Labeled>(json).unwrap().label
    }

    #[test]
    fn test_optional_label_tolerates_stray_values() {
        assert_eq!(read_label(r#"{}"#), None);
        assert_eq!(read_label(r#"{"label": null}"#), None);
        assert_eq!(read_label(r#"{"label": "  "}"#), None);
        assert_eq!(read_label(r#"{"label": false}"#), None);
        assert_eq!(read_label(r#"{"label": " False "}"#), Some(Label::False));
        assert_eq!(read_label(r#"{"label": true}"#), Some(Label::Unverified));
        assert_eq!(read_label(r#"{"label": 3}"#), Some(Label::Unverified));
        assert_eq!(read_label(r#"{"label": ["true"]}"#), Some(Label::Unverified));
    }

    #[test]
    fn test_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Label::Misleading).unwrap(), "\"misleading\"");
        let label: Label = serde_json::from_str("\"unverified\"").unwrap();
        assert_eq!(label, Label::Unverified);
    }
}
