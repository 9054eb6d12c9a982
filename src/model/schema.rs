// src/model/schema.rs
//! Where each logical field lives in the payload variants we accept.
//!
//! Search responses and post objects come in several shapes (v1.1 style
//! snake_case, GraphQL-style camelCase, wrapped "extended" posts). Every
//! logical field is declared once here as an ordered list of paths.

use super::lookup::{FieldPath, Lookup};
use crate::types::ItemId;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Search response envelope
// ---------------------------------------------------------------------------

pub const SEARCH_ITEMS: Lookup = Lookup::new(
    "items",
    &[
        FieldPath(&["tweets"]),
        FieldPath(&["data"]),
        FieldPath(&["results"]),
        FieldPath(&["statuses"]),
    ],
);

pub const NEXT_CURSOR: Lookup = Lookup::new(
    "next_cursor",
    &[
        FieldPath(&["next_cursor"]),
        FieldPath(&["next_token"]),
        FieldPath(&["next"]),
    ],
);

pub const HAS_NEXT_PAGE: Lookup = Lookup::new(
    "has_next_page",
    &[FieldPath(&["has_next_page"]), FieldPath(&["has_next"])],
);

// ---------------------------------------------------------------------------
// Post fields
// ---------------------------------------------------------------------------

pub const ITEM_ID: Lookup = Lookup::new(
    "id",
    &[
        FieldPath(&["id"]),
        FieldPath(&["tweet_id"]),
        FieldPath(&["rest_id"]),
    ],
);

pub const AUTHOR_ID: Lookup = Lookup::new(
    "author_id",
    &[
        FieldPath(&["user", "id_str"]),
        FieldPath(&["user", "id"]),
        FieldPath(&["author", "id"]),
    ],
);

pub const AUTHOR_HANDLE: Lookup = Lookup::new(
    "author_screen_name",
    &[
        FieldPath(&["user", "screen_name"]),
        FieldPath(&["author", "userName"]),
        FieldPath(&["author", "screen_name"]),
    ],
);

pub const TEXT: Lookup = Lookup::new("text", &[FieldPath(&["full_text"]), FieldPath(&["text"])]);

pub const CREATED_AT: Lookup = Lookup::new(
    "created_at",
    &[FieldPath(&["created_at"]), FieldPath(&["createdAt"])],
);

pub const LANG: Lookup = Lookup::new("lang", &[FieldPath(&["lang"])]);

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// Entity wrapper inside a post. Variants are alternatives: the first one
/// present is used.
pub const ENTITIES: Lookup = Lookup::new(
    "entities",
    &[
        FieldPath(&["extended_entities"]),
        FieldPath(&["extendedEntities"]),
        FieldPath(&["entities"]),
    ],
);

/// Top-level media list some payload flavours carry.
pub const TOP_LEVEL_MEDIA: Lookup = Lookup::new("media", &[FieldPath(&["media"])]);

/// Wrapper around the full form of a long post.
pub const EXTENDED_POST: Lookup = Lookup::new(
    "extended_tweet",
    &[FieldPath(&["extended_tweet"]), FieldPath(&["extendedTweet"])],
);

/// Media list inside an entity wrapper.
pub const ENTITY_MEDIA: Lookup = Lookup::new("media", &[FieldPath(&["media"])]);

/// Kind of a media entry (`photo`, `video`, `animated_gif`).
pub const MEDIA_TYPE: Lookup = Lookup::new("type", &[FieldPath(&["type"])]);

/// Display URL of a media entry, secure form first.
pub const MEDIA_URL: Lookup = Lookup::new(
    "media_url",
    &[
        FieldPath(&["media_url_https"]),
        FieldPath(&["media_url"]),
        FieldPath(&["url"]),
        FieldPath(&["src"]),
    ],
);

/// Resolves the logical id of a raw post.
pub fn item_id(raw: &Value) -> Option<ItemId> {
    ITEM_ID
        .find_text(raw)
        .and_then(|text| ItemId::parse(&text).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_id_variants() {
        assert_eq!(item_id(&json!({"id": "7"})).unwrap().as_str(), "7");
        assert_eq!(item_id(&json!({"tweet_id": 8})).unwrap().as_str(), "8");
        assert_eq!(item_id(&json!({"rest_id": "9"})).unwrap().as_str(), "9");
        assert_eq!(item_id(&json!({"id": "", "rest_id": "10"})).unwrap().as_str(), "10");
        assert!(item_id(&json!({"text": "no id here"})).is_none());
    }
}
