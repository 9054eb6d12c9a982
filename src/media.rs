// src/media.rs
//! Filter stage: keep posts that carry at least one photo.
//!
//! Media entries hide in several places depending on the payload flavour.
//! Every known location is probed and the results are merged before
//! filtering by type and deduplicating by URL.

use crate::model::schema::{
    self, AUTHOR_HANDLE, AUTHOR_ID, CREATED_AT, ENTITIES, ENTITY_MEDIA, EXTENDED_POST, LANG,
    MEDIA_TYPE, MEDIA_URL, TEXT, TOP_LEVEL_MEDIA,
};
use crate::model::{RawItem, Row};
use serde_json::Value;
use std::collections::HashSet;

/// Media `type` values treated as still images.
const PHOTO_TYPES: [&str; 2] = ["photo", "image"];

/// Media entries found in every known location of a post, in probe order.
fn media_candidates(post: &Value) -> Vec<&Value> {
    let mut candidates: Vec<&Value> = Vec::new();

    entity_media(post, &mut candidates);

    if let Some(items) = TOP_LEVEL_MEDIA.find_array(post) {
        candidates.extend(items.iter());
    }

    if let Some(extended) = EXTENDED_POST.find_object(post) {
        entity_media(extended, &mut candidates);
    }

    candidates
}

fn entity_media<'a>(holder: &'a Value, out: &mut Vec<&'a Value>) {
    if let Some(entities) = ENTITIES.find_object(holder) {
        if let Some(media) = ENTITY_MEDIA.find_array(entities) {
            out.extend(media.iter());
        }
    }
}

/// Untyped entries count as photos. Anything else with a type (video,
/// animated_gif, even an empty string) does not.
fn is_photo_like(entry: &Value) -> bool {
    match MEDIA_TYPE.find_raw(entry) {
        None | Some(Value::Null) => true,
        Some(Value::String(kind)) => PHOTO_TYPES.contains(&kind.as_str()),
        Some(_) => false,
    }
}

/// Returns the deduplicated photo URLs of a post, in first-seen order.
pub fn extract_image_urls(post: &Value) -> Vec<String> {
    let mut seen = HashSet::new();
    media_candidates(post)
        .into_iter()
        .filter(|entry| entry.is_object() && is_photo_like(entry))
        .filter_map(|entry| MEDIA_URL.find_text(entry))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Projects a raw post into a dataset row, or `None` if it has no photos.
pub fn project_row(post: RawItem) -> Option<Row> {
    let image_urls = extract_image_urls(&post);
    if image_urls.is_empty() {
        return None;
    }

    let mut row = Row::new(schema::item_id(&post), image_urls);
    row.author_id = AUTHOR_ID.find_text(&post);
    row.author_screen_name = AUTHOR_HANDLE.find_text(&post);
    row.text = TEXT.find_text(&post);
    row.created_at = CREATED_AT.find_text(&post);
    row.lang = LANG.find_text(&post);
    row.raw = post;
    Some(row)
}

/// Keeps only posts with at least one photo, in input order.
pub fn select_with_images(items: Vec<RawItem>) -> Vec<Row> {
    let total = items.len();
    let rows: Vec<Row> = items.into_iter().filter_map(project_row).collect();
    log::info!(
        "Kept {} of {} posts with at least one image",
        rows.len(),
        total
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_video_only_post_is_dropped() {
        let post = json!({
            "id": "1",
            "extended_entities": {"media": [
                {"type": "video", "media_url_https": "https://pbs.twimg.com/ext_tw_video_thumb/1.jpg"}
            ]}
        });
        assert!(extract_image_urls(&post).is_empty());
        assert!(select_with_images(vec![post]).is_empty());
    }

    #[test]
    fn test_merges_locations_and_dedupes() {
        let post = json!({
            "id": "2",
            "extendedEntities": {"media": [
                {"type": "photo", "media_url_https": "https://img/a.jpg", "url": "https://t.co/x"},
                {"type": "animated_gif", "media_url_https": "https://img/g.mp4"}
            ]},
            "media": [
                {"url": "https://img/b.jpg"},
                {"type": "image", "src": "https://img/a.jpg"}
            ],
            "extended_tweet": {"entities": {"media": [
                {"type": "photo", "media_url": "http://img/c.jpg"}
            ]}}
        });
        assert_eq!(
            extract_image_urls(&post),
            vec!["https://img/a.jpg", "https://img/b.jpg", "http://img/c.jpg"]
        );
    }

    #[test]
    fn test_entity_wrappers_are_alternatives() {
        // extended_entities wins; the plain entities block is not read.
        let post = json!({
            "extended_entities": {"media": [{"type": "photo", "media_url_https": "https://img/a.jpg"}]},
            "entities": {"media": [{"type": "photo", "media_url_https": "https://img/thumb.jpg"}]}
        });
        assert_eq!(extract_image_urls(&post), vec!["https://img/a.jpg"]);
    }

    #[test]
    fn test_empty_type_is_not_a_photo() {
        let post = json!({"media": [{"type": "", "url": "https://img/a.jpg"}]});
        assert!(extract_image_urls(&post).is_empty());
    }

    #[test]
    fn test_projection() {
        let post = json!({
            "id": 42,
            "full_text": "الحبة السوداء تشفي كل داء",
            "text": "truncated",
            "createdAt": "Tue Dec 10 07:00:30 +0000 2024",
            "lang": "ar",
            "author": {"id": "99", "userName": "herbal_cures"},
            "media": [{"media_url_https": "https://img/a.jpg"}]
        });
        let row = project_row(post.clone()).unwrap();

        assert_eq!(row.display_id(), "42");
        assert_eq!(row.author_id.as_deref(), Some("99"));
        assert_eq!(row.author_screen_name.as_deref(), Some("herbal_cures"));
        assert_eq!(row.text.as_deref(), Some("الحبة السوداء تشفي كل داء"));
        assert_eq!(row.created_at.as_deref(), Some("Tue Dec 10 07:00:30 +0000 2024"));
        assert_eq!(row.lang.as_deref(), Some("ar"));
        assert_eq!(row.raw, post);
    }
}
