// src/model/lookup.rs
//! Schema-tolerant field lookup over raw JSON payloads.
//!
//! The same logical field shows up under different names depending on which
//! API flavour produced a payload (`id` vs `rest_id`, `tweets` vs `statuses`,
//! `extended_entities` vs `extendedEntities`). A [`Lookup`] names the logical
//! field and lists the concrete [`FieldPath`]s to probe, in priority order.
//! Supporting a new schema variant means adding a path to a list.

use serde_json::Value;

/// A nested key path, e.g. `["user", "screen_name"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static [&'static str]);

impl FieldPath {
    /// Follows the path through nested objects.
    pub fn get<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.0
            .iter()
            .try_fold(value, |current, key| current.as_object()?.get(*key))
    }
}

/// A logical field resolved from an ordered list of candidate paths.
#[derive(Debug, Clone, Copy)]
pub struct Lookup {
    pub name: &'static str,
    pub paths: &'static [FieldPath],
}

impl Lookup {
    pub const fn new(name: &'static str, paths: &'static [FieldPath]) -> Self {
        Self { name, paths }
    }

    /// First candidate that holds a meaningful value.
    pub fn find<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.paths
            .iter()
            .filter_map(|path| path.get(value))
            .find(|candidate| is_present(candidate))
    }

    /// First candidate path that exists, whatever its value.
    pub fn find_raw<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.paths.iter().find_map(|path| path.get(value))
    }

    /// First candidate rendered as text. Numbers count, so that ids
    /// serialized as integers resolve the same as string ids.
    pub fn find_text(&self, value: &Value) -> Option<String> {
        self.paths
            .iter()
            .filter_map(|path| path.get(value))
            .find_map(scalar_text)
    }

    /// First candidate that is a JSON array.
    pub fn find_array<'a>(&self, value: &'a Value) -> Option<&'a Vec<Value>> {
        self.find(value).and_then(Value::as_array)
    }

    /// First candidate that is a JSON object.
    pub fn find_object<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.find(value).filter(|v| v.is_object())
    }

    /// Whether any candidate holds a truthy value.
    pub fn is_truthy(&self, value: &Value) -> bool {
        self.find(value).is_some()
    }
}

/// `null`, `false`, empty strings and empty containers count as absent.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Number(_) => true,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
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

    const AUTHOR: Lookup = Lookup::new(
        "author",
        &[
            FieldPath(&["user", "screen_name"]),
            FieldPath(&["author", "userName"]),
        ],
    );

    #[test]
    fn test_first_present_path_wins() {
        let payload = json!({
            "user": {"screen_name": ""},
            "author": {"userName": "dr_herbs"}
        });
        assert_eq!(AUTHOR.find_text(&payload).as_deref(), Some("dr_herbs"));
    }

    #[test]
    fn test_priority_order() {
        let payload = json!({
            "user": {"screen_name": "first"},
            "author": {"userName": "second"}
        });
        assert_eq!(AUTHOR.find_text(&payload).as_deref(), Some("first"));
    }

    #[test]
    fn test_missing_and_non_object_intermediates() {
        assert_eq!(AUTHOR.find(&json!({"user": "not-an-object"})), None);
        assert_eq!(AUTHOR.find(&json!([])), None);
    }

    #[test]
    fn test_raw_lookup_keeps_falsy_values() {
        let kind = Lookup::new("type", &[FieldPath(&["type"])]);
        assert_eq!(kind.find_raw(&json!({"type": ""})), Some(&json!("")));
        assert_eq!(kind.find(&json!({"type": ""})), None);
        assert_eq!(kind.find_raw(&json!({"url": "x"})), None);
    }

    #[test]
    fn test_numbers_render_as_text() {
        let ids = Lookup::new("id", &[FieldPath(&["id"])]);
        assert_eq!(ids.find_text(&json!({"id": 17})).as_deref(), Some("17"));
    }

    #[test]
    fn test_presence_rules() {
        assert!(!is_present(&json!(null)));
        assert!(!is_present(&json!(false)));
        assert!(!is_present(&json!("")));
        assert!(!is_present(&json!([])));
        assert!(!is_present(&json!({})));
        assert!(is_present(&json!(0)));
        assert!(is_present(&json!("cursor")));
    }
}
