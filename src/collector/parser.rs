// src/collector/parser.rs
//! Turns a raw search response body into a [`SearchPage`].

use crate::algebras::SearchPage;
use crate::error::AppError;
use crate::model::schema::{HAS_NEXT_PAGE, NEXT_CURSOR, SEARCH_ITEMS};
use serde_json::Value;

/// Parses a search response, tolerating the known envelope variants.
///
/// A response that is not a JSON object is malformed. An object without any
/// recognised items key is a valid, empty page.
pub fn parse_search_page(body: &Value) -> Result<SearchPage, AppError> {
    if !body.is_object() {
        return Err(AppError::MalformedResponse(format!(
            "search response is not a JSON object: {}",
            preview(body)
        )));
    }

    let items = SEARCH_ITEMS.find_array(body).cloned().unwrap_or_default();
    let next_cursor = NEXT_CURSOR.find_text(body);
    let has_more = HAS_NEXT_PAGE.is_truthy(body) || next_cursor.is_some();

    Ok(SearchPage {
        items,
        next_cursor,
        has_more,
    })
}

/// Parses a response body given as text.
pub fn parse_search_body(text: &str) -> Result<SearchPage, AppError> {
    let body: Value = serde_json::from_str(text)?;
    parse_search_page(&body)
}

fn preview(body: &Value) -> String {
    let rendered = body.to_string();
    if rendered.chars().count() > 200 {
        let head: String = rendered.chars().take(200).collect();
        format!("{}...", head)
    } else {
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_twitterapi_envelope() {
        let page = parse_search_page(&json!({
            "tweets": [{"id": "1"}, {"id": "2"}],
            "has_next_page": true,
            "next_cursor": "DAACCgAC"
        }))
        .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next_cursor.as_deref(), Some("DAACCgAC"));
        assert!(page.has_more);
    }

    #[test]
    fn test_alternative_envelopes() {
        let page = parse_search_page(&json!({
            "statuses": [{"id_str": "1", "id": 1}],
            "next_token": "t2"
        }))
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.next_cursor.as_deref(), Some("t2"));
        assert!(page.has_more);

        let page = parse_search_page(&json!({"data": [], "has_next": false})).unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn test_empty_cursor_means_last_page() {
        let page = parse_search_page(&json!({
            "tweets": [{"id": "1"}],
            "has_next_page": false,
            "next_cursor": ""
        }))
        .unwrap();
        assert_eq!(page.next_cursor, None);
        assert!(!page.can_continue());
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert!(parse_search_page(&json!([1, 2, 3])).is_err());
        assert!(parse_search_body("<html>rate limited</html>").is_err());
    }
}
