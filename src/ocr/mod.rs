// src/ocr/mod.rs
//! Text-extraction stage and its collaborators.

mod cleaning;
mod stage;
mod tesseract;

pub use cleaning::{normalize_arabic_letters, CleaningRules};
pub use stage::{
    enrich_with_text, extract_image, ExtractOptions, ExtractionOutcome, ExtractionReport,
};
pub use tesseract::TesseractExtractor;
