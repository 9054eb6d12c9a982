// src/model/row.rs
//! The dataset record that flows through every stage after collection.

use crate::types::{deserialize_optional_label, ItemId, Label};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One post plus the metadata attached to it by the stages so far.
///
/// The schema is additive: each stage fills in its own fields and leaves
/// the rest alone. Fields this version does not know about are captured in
/// `extra` and written back verbatim, so a row never loses data by passing
/// through a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub tweet_id: Option<ItemId>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub author_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub author_screen_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub lang: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub image_urls: Vec<String>,
    /// Source payload, preserved for audit.
    #[serde(default)]
    pub raw: Value,

    // Text extraction
    #[serde(
        default,
        deserialize_with = "deserialize_optional_aligned_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub ocr_texts: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub ocr_text_combined: Option<String>,

    // Classification
    #[serde(
        default,
        deserialize_with = "deserialize_optional_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_claim_pattern: Option<bool>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_strong_claim: Option<bool>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<Label>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub label_justification: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub label_sources: Option<Vec<String>>,

    // Asset materialization
    #[serde(
        default,
        deserialize_with = "deserialize_optional_aligned_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_paths: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Row {
    /// A bare row with the given id and image URLs.
    pub fn new(tweet_id: Option<ItemId>, image_urls: Vec<String>) -> Self {
        Self {
            tweet_id,
            author_id: None,
            author_screen_name: None,
            text: None,
            created_at: None,
            lang: None,
            image_urls,
            raw: Value::Null,
            ocr_texts: None,
            ocr_text_combined: None,
            has_claim_pattern: None,
            is_strong_claim: None,
            label: None,
            label_justification: None,
            label_sources: None,
            image_paths: None,
            extra: Map::new(),
        }
    }

    /// Id for progress messages.
    pub fn display_id(&self) -> &str {
        self.tweet_id
            .as_ref()
            .map(ItemId::as_str)
            .unwrap_or(crate::constants::UNKNOWN_ITEM_ID)
    }

    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn extracted_text_or_empty(&self) -> &str {
        self.ocr_text_combined.as_deref().unwrap_or("")
    }

    pub fn is_labeled(&self) -> bool {
        self.label.is_some()
    }
}

// Row fields come from files that people edit by hand. A value of the wrong
// JSON type is read as absent (or dropped from its list) instead of failing
// the whole artifact.

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<ItemId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(ItemId::from_json(&raw))
}

/// Strings as-is, numbers in their JSON form, anything else absent.
fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn deserialize_optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}

/// Accepts a list of strings, tolerating `null` and dropping non-string entries.
fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_optional_string_list(deserializer)?.unwrap_or_default())
}

fn deserialize_optional_string_list<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Lists indexed like `image_urls`: non-string entries become empty strings
/// so positions stay aligned.
fn deserialize_optional_aligned_list<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => s,
                    _ => String::new(),
                })
                .collect(),
        ),
        _ => None,
    })
}
