// src/assets/paths.rs
//! Pure functions for local image file naming.
//!
//! No I/O happens here.

use crate::constants::{DEFAULT_IMAGE_EXTENSION, KNOWN_IMAGE_EXTENSIONS, UNKNOWN_ITEM_ID};
use crate::types::ItemId;
use std::path::{Path, PathBuf};

/// Suffix of a download that has not been renamed into place yet.
pub const PARTIAL_SUFFIX: &str = ".part";

/// Maps an item id onto `[0-9A-Za-z_-]`, replacing anything else with `_`.
pub fn safe_item_id(id: Option<&ItemId>) -> String {
    match id {
        None => UNKNOWN_ITEM_ID.to_string(),
        Some(id) => id
            .as_str()
            .chars()
            .map(|c| match c {
                '0'..='9' | 'A'..='Z' | 'a'..='z' | '_' | '-' => c,
                _ => '_',
            })
            .collect(),
    }
}

/// Infers an image extension (with leading dot) from a URL.
///
/// A `format` query parameter of three or four lowercase alphanumerics wins.
/// Otherwise the first known extension found in the path is used, else
/// `.jpg`.
pub fn guess_extension(url: &str) -> String {
    let lowered = url.trim().to_lowercase();
    let (path, query) = split_path_and_query(&lowered);

    let hinted = query.and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "format")
            .map(|(_, value)| value.into_owned())
    });
    if let Some(format) = hinted.filter(|f| is_format_token(f)) {
        return format!(".{}", format);
    }

    KNOWN_IMAGE_EXTENSIONS
        .iter()
        .find(|ext| path.contains(*ext))
        .copied()
        .unwrap_or(DEFAULT_IMAGE_EXTENSION)
        .to_string()
}

fn is_format_token(value: &str) -> bool {
    (3..=4).contains(&value.len())
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

/// Splits a URL into its path and query, dropping any fragment. Relative
/// references are accepted.
fn split_path_and_query(url: &str) -> (String, Option<String>) {
    if let Ok(parsed) = url::Url::parse(url) {
        return (parsed.path().to_string(), parsed.query().map(str::to_string));
    }

    let without_fragment = url.split('#').next().unwrap_or(url);
    match without_fragment.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (without_fragment.to_string(), None),
    }
}

/// `<safe id>_<index><ext>`
pub fn image_filename(safe_id: &str, index: usize, url: &str) -> String {
    format!("{}_{}{}", safe_id, index, guess_extension(url))
}

/// Location of the in-flight download for `target`.
pub fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_hint_beats_path_suffix() {
        assert_eq!(guess_extension("https://pbs.twimg.com/media/abc.png?format=webp"), ".webp");
        assert_eq!(guess_extension("a.png?format=webp"), ".webp");
        assert_eq!(
            guess_extension("https://pbs.twimg.com/media/GfX1?format=JPG&name=large"),
            ".jpg"
        );
    }

    #[test]
    fn test_invalid_hint_falls_through() {
        assert_eq!(guess_extension("https://img/x.png?format=jpeg2000"), ".png");
        assert_eq!(guess_extension("https://img/x.webp?format=j"), ".webp");
    }

    #[test]
    fn test_path_suffix_order_and_default() {
        assert_eq!(guess_extension("https://img/photo.JPEG"), ".jpeg");
        assert_eq!(guess_extension("https://img/photo.jpg"), ".jpg");
        assert_eq!(guess_extension("https://img/photo"), ".jpg");
        // Host names are not part of the path.
        assert_eq!(guess_extension("https://cdn.png.example/photo"), ".jpg");
    }

    #[test]
    fn test_safe_item_id() {
        let id = ItemId::parse("1789/../x y").unwrap();
        assert_eq!(safe_item_id(Some(&id)), "1789____x_y");
        assert_eq!(safe_item_id(None), "unknown");
        let id = ItemId::parse("abc_DEF-123").unwrap();
        assert_eq!(safe_item_id(Some(&id)), "abc_DEF-123");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(image_filename("42", 1, "https://img/a.png"), "42_1.png");
        assert_eq!(
            partial_path(Path::new("tweet_images/42_1.png")),
            PathBuf::from("tweet_images/42_1.png.part")
        );
    }
}
