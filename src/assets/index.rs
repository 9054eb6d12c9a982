// src/assets/index.rs
//! Flat per-image index for downstream consumers.

use crate::constants::INDEX_COLUMNS;
use crate::error::AppError;

/// One line of the image index: an (item, image) pair that exists on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    pub item_id: String,
    pub image_index: usize,
    pub image_path: String,
    pub label: String,
    pub text: String,
    pub extracted_text: String,
}

/// Neutralizes untrusted free text for the index: newlines become spaces
/// and double quotes become single quotes.
pub fn escape_field(value: &str) -> String {
    value
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('"', "'")
}

/// Renders the full index with a header line; every value is quoted.
pub fn render_index_csv(rows: &[IndexRow]) -> Result<String, AppError> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(vec![]);

    wtr.write_record(INDEX_COLUMNS)?;
    for r in rows {
        wtr.write_record([
            escape_field(&r.item_id),
            r.image_index.to_string(),
            escape_field(&r.image_path),
            escape_field(&r.label),
            escape_field(&r.text),
            escape_field(&r.extracted_text),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("line one\nline \"two\"\r\n"), "line one line 'two' ");
    }

    #[test]
    fn test_render() {
        let rows = vec![IndexRow {
            item_id: "42".into(),
            image_index: 0,
            image_path: "tweet_images/42_0.jpg".into(),
            label: "false".into(),
            text: "يشفي \"كل\" الأمراض\nفورا".into(),
            extracted_text: String::new(),
        }];
        let csv = render_index_csv(&rows).unwrap();
        assert_eq!(
            csv,
            concat!(
                "\"item_id\",\"image_index\",\"image_path\",\"label\",\"text\",\"extracted_text\"\n",
                "\"42\",\"0\",\"tweet_images/42_0.jpg\",\"false\",\"يشفي 'كل' الأمراض فورا\",\"\"\n"
            )
        );
    }

    #[test]
    fn test_header_only_when_empty() {
        let csv = render_index_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
