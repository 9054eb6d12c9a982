// src/ocr/stage.rs
//! Text-extraction stage: attach cleaned image text to every row.

use super::CleaningRules;
use crate::algebras::{ImageSource, TextExtractor};
use crate::constants::OCR_PARAGRAPH_SEPARATOR;
use crate::model::Row;

/// Options for one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub rules: CleaningRules,
    /// Leave rows that already carry `ocr_texts` untouched.
    pub skip_processed: bool,
}

/// What one image produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Cleaned, non-empty text.
    Text(String),
    /// The engine ran but nothing survived cleaning.
    Blank,
    /// Fetch or extraction failed; the image is skipped.
    Failed { reason: String },
}

/// Counters for one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub rows_processed: usize,
    pub rows_skipped: usize,
    pub images_attempted: usize,
    pub images_with_text: usize,
    pub images_failed: usize,
}

/// Fetches one image and runs it through extraction and cleaning.
pub fn extract_image<I, E>(
    url: &str,
    images: &I,
    extractor: &E,
    rules: &CleaningRules,
) -> ExtractionOutcome
where
    I: ImageSource + ?Sized,
    E: TextExtractor + ?Sized,
{
    let raw = images
        .fetch_image(url)
        .and_then(|bytes| extractor.extract_text(&bytes));

    match raw {
        Ok(text) => {
            let cleaned = rules.normalize(&text);
            if cleaned.is_empty() {
                ExtractionOutcome::Blank
            } else {
                ExtractionOutcome::Text(cleaned)
            }
        }
        Err(e) => ExtractionOutcome::Failed {
            reason: e.to_string(),
        },
    }
}

/// Runs extraction over every image of every row, in order.
///
/// A failing image is logged and left out; it never fails the row or the
/// run. A row whose images all fail ends up with an empty text list.
pub fn enrich_with_text<I, E>(
    rows: &mut [Row],
    images: &I,
    extractor: &E,
    options: &ExtractOptions,
) -> ExtractionReport
where
    I: ImageSource + ?Sized,
    E: TextExtractor + ?Sized,
{
    let total = rows.len();
    let mut report = ExtractionReport::default();

    for (idx, row) in rows.iter_mut().enumerate() {
        if options.skip_processed && row.ocr_texts.is_some() {
            log::debug!(
                "[{}/{}] Skipping tweet_id={}: already processed",
                idx + 1,
                total,
                row.display_id()
            );
            report.rows_skipped += 1;
            continue;
        }

        log::info!(
            "[{}/{}] OCR for tweet_id={} with {} image(s)",
            idx + 1,
            total,
            row.display_id(),
            row.image_urls.len()
        );

        let mut texts = Vec::new();
        for url in &row.image_urls {
            report.images_attempted += 1;
            match extract_image(url, images, extractor, &options.rules) {
                ExtractionOutcome::Text(text) => {
                    report.images_with_text += 1;
                    texts.push(text);
                }
                ExtractionOutcome::Blank => log::debug!("  - No readable text in {}", url),
                ExtractionOutcome::Failed { reason } => {
                    report.images_failed += 1;
                    log::warn!("  - Error OCRing {}: {}", url, reason);
                }
            }
        }

        row.ocr_text_combined = Some(texts.join(OCR_PARAGRAPH_SEPARATOR));
        row.ocr_texts = Some(texts);
        report.rows_processed += 1;
    }

    log::info!(
        "Extracted text from {} of {} image(s) across {} row(s) ({} failed, {} row(s) skipped)",
        report.images_with_text,
        report.images_attempted,
        report.rows_processed,
        report.images_failed,
        report.rows_skipped
    );
    report
}
