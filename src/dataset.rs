// src/dataset.rs
//! Artifact file I/O.
//!
//! Every stage reads exactly one JSON artifact and writes exactly one. A
//! missing or unparseable input is stage-fatal; nothing else here is.

use crate::error::AppError;
use crate::model::{RawItem, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Reads a JSON array artifact.
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AppError> {
    if !path.is_file() {
        return Err(AppError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path)?;
    let items: Vec<T> = serde_json::from_str(&text).map_err(|source| AppError::JsonParseError {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Loaded {} record(s) from {}", items.len(), path.display());
    Ok(items)
}

/// Reads a collector artifact.
pub fn read_raw_items(path: &Path) -> Result<Vec<RawItem>, AppError> {
    read_json_array(path)
}

/// Reads a row artifact written by any stage after collection.
pub fn read_rows(path: &Path) -> Result<Vec<Row>, AppError> {
    read_json_array(path)
}

/// Writes records as indented, UTF-8 JSON.
pub fn write_json<T: Serialize>(path: &Path, records: &[T]) -> Result<usize, AppError> {
    let content = serde_json::to_string_pretty(records).map_err(|e| AppError::InternalError {
        message: format!("could not serialize {}", path.display()),
        source: Some(Box::new(e)),
    })?;
    let bytes = write_text(path, &content)?;
    log::info!("Saved {} record(s) to {}", records.len(), path.display());
    Ok(bytes)
}

/// Writes content to a file, creating parent directories if needed.
pub fn write_text(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.json");
        let err = read_raw_items(&path).unwrap_err();
        assert!(matches!(err, AppError::InputNotFound { .. }));
        assert!(err.is_stage_fatal());
    }

    #[test]
    fn test_unparseable_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        fs::write(&path, "[{\"tweet_id\": \"1\"").unwrap();
        let err = read_rows(&path).unwrap_err();
        assert!(matches!(err, AppError::JsonParseError { .. }));
    }

    #[test]
    fn test_one_odd_row_does_not_reject_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labeled.json");
        fs::write(
            &path,
            r#"[{"tweet_id": "1", "label": "false"}, {"tweet_id": "2", "label": true, "text": 7}]"#,
        )
        .unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, Some(crate::types::Label::False));
        assert_eq!(rows[1].label, Some(crate::types::Label::Unverified));
        assert_eq!(rows[1].text.as_deref(), Some("7"));
    }

    #[test]
    fn test_write_is_readable_and_unicode_preserving() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        let items = vec![json!({"id": "1", "text": "صحة"})];

        write_json(&path, &items).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("صحة"));
        assert!(text.contains("\n  {"));
        assert_eq!(read_raw_items(&path).unwrap(), items);
    }
}
