// src/labeling/claims.rs
//! Keyword signals for health claims, independent of the classifier.

use once_cell::sync::Lazy;
use regex::Regex;

/// Cure promises, "no side effects" guarantees and conspiracy framing.
static CLAIM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(يشفي|يعالج|يقضي على|يمنع|يحمي من|يسبب|",
        r"يزيد\s+خطر|بدون\s+آثار\s+جانبية|بدون\s+دواء|بدون\s+أدوية|",
        r"طبيعي\s*100%|مضمون\s*100%|معجزة|خلطة\s+سحرية|",
        r"سر\s+لا\s+يريدونك\s+أن\s+تعرفه|",
        r"الحقيقة\s+التي\s+لا\s+تخبرك\s+بها\s+وزارة\s+الصحة|",
        r"خداع\s+شركات\s+الأدوية)"
    ))
    .expect("Failed to compile claim regex - this is a bug in the code")
});

/// Whether `text` contains claim wording.
pub fn looks_like_claim(text: &str) -> bool {
    !text.is_empty() && CLAIM_PATTERN.is_match(text)
}

/// The two claim-pattern signals stored on every row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClaimFlags {
    /// Post text or image text matches.
    pub has_claim_pattern: bool,
    /// Image text alone matches.
    pub is_strong_claim: bool,
}

impl ClaimFlags {
    pub fn compute(text: &str, extracted_text: &str) -> Self {
        let combined = format!("{}\n{}", text, extracted_text);
        Self {
            has_claim_pattern: looks_like_claim(&combined),
            is_strong_claim: looks_like_claim(extracted_text),
        }
    }
}
