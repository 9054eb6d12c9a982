// src/analytics/mod.rs
//! Dataset statistics for any artifact produced after collection.

use crate::model::Row;
use crate::types::Label;
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::fmt;

/// Timestamp layout used by the search API, e.g. `Tue Dec 10 07:00:30 +0000 2024`.
const POST_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Counts describing how far a dataset has progressed through the stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub rows_with_images: usize,
    pub image_urls: usize,
    /// Rows the text-extraction stage has visited.
    pub rows_ocr_processed: usize,
    /// Rows with non-empty extracted text.
    pub rows_with_extracted_text: usize,
    pub labels: BTreeMap<Label, usize>,
    pub unlabeled: usize,
    pub claim_pattern: usize,
    pub strong_claim: usize,
    pub materialized_images: usize,
    pub earliest: Option<DateTime<FixedOffset>>,
    pub latest: Option<DateTime<FixedOffset>>,
}

/// Parses a post timestamp in either the search API layout or RFC 3339.
pub fn parse_post_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, POST_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

/// Summarizes a set of rows.
pub fn summarize(rows: &[Row]) -> DatasetSummary {
    let mut summary = DatasetSummary {
        rows: rows.len(),
        ..DatasetSummary::default()
    };

    for row in rows {
        if !row.image_urls.is_empty() {
            summary.rows_with_images += 1;
        }
        summary.image_urls += row.image_urls.len();

        if row.ocr_texts.is_some() {
            summary.rows_ocr_processed += 1;
        }
        if !row.extracted_text_or_empty().is_empty() {
            summary.rows_with_extracted_text += 1;
        }

        match row.label {
            Some(label) => *summary.labels.entry(label).or_insert(0) += 1,
            None => summary.unlabeled += 1,
        }
        if row.has_claim_pattern == Some(true) {
            summary.claim_pattern += 1;
        }
        if row.is_strong_claim == Some(true) {
            summary.strong_claim += 1;
        }
        summary.materialized_images += row.image_paths.as_ref().map_or(0, Vec::len);

        if let Some(ts) = row.created_at.as_deref().and_then(parse_post_timestamp) {
            summary.earliest = Some(summary.earliest.map_or(ts, |e| e.min(ts)));
            summary.latest = Some(summary.latest.map_or(ts, |l| l.max(ts)));
        }
    }

    summary
}

impl DatasetSummary {
    pub fn labeled(&self) -> usize {
        self.labels.values().sum()
    }

    pub fn label_count(&self, label: Label) -> usize {
        self.labels.get(&label).copied().unwrap_or(0)
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows:                   {}", self.rows)?;
        writeln!(f, "Rows with images:       {}", self.rows_with_images)?;
        writeln!(f, "Image URLs:             {}", self.image_urls)?;
        writeln!(
            f,
            "OCR processed:          {} ({} with text)",
            self.rows_ocr_processed, self.rows_with_extracted_text
        )?;
        writeln!(f, "Labeled:                {}", self.labeled())?;
        for label in Label::ALL {
            writeln!(f, "  {:<21} {}", label.as_str(), self.label_count(label))?;
        }
        writeln!(f, "Unlabeled:              {}", self.unlabeled)?;
        writeln!(
            f,
            "Claim pattern:          {} ({} strong)",
            self.claim_pattern, self.strong_claim
        )?;
        write!(f, "Local images:           {}", self.materialized_images)?;
        if let (Some(earliest), Some(latest)) = (self.earliest, self.latest) {
            write!(
                f,
                "\nPosted between:         {} and {}",
                earliest.format("%Y-%m-%d"),
                latest.format("%Y-%m-%d")
            )?;
        }
        Ok(())
    }
}
