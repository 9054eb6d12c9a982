// src/ocr/cleaning.rs
//! Normalization of noisy OCR output, tuned for Arabic.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Bidi marks, zero-width joiners and isolates.
static CONTROL_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{200C}-\x{200F}\x{202A}-\x{202E}\x{2066}-\x{2069}]")
        .expect("Failed to compile control-character regex - this is a bug in the code")
});

/// Harakat, Quranic annotation marks and tatweel.
static ARABIC_DIACRITICS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{0610}-\x{061A}\x{064B}-\x{065F}\x{06D6}-\x{06ED}\x{0640}]")
        .expect("Failed to compile diacritics regex - this is a bug in the code")
});

static ALEF_VARIANTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[أإآٱ]").expect("Failed to compile alef regex - this is a bug in the code")
});

static DISALLOWED_ARABIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[^0-9\x{0600}-\x{06FF}\s.,:;\-()\[\]!؟"'،]"#)
        .expect("Failed to compile character-class regex - this is a bug in the code")
});

static DISALLOWED_ARABIC_ENGLISH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[^0-9A-Za-z\x{0600}-\x{06FF}\s.,:;\-()\[\]!؟"'،]"#)
        .expect("Failed to compile character-class regex - this is a bug in the code")
});

static ASCII_DIGITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]").expect("Failed to compile digit regex - this is a bug in the code")
});

static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Failed to compile whitespace regex - this is a bug in the code")
});

/// What survives cleaning besides Arabic script and basic punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleaningRules {
    /// Keep Latin letters.
    pub keep_english: bool,
    /// Keep ASCII digits.
    pub keep_digits: bool,
}

impl Default for CleaningRules {
    fn default() -> Self {
        Self {
            keep_english: false,
            keep_digits: true,
        }
    }
}

impl CleaningRules {
    /// Rules that keep Latin text as well.
    pub fn bilingual() -> Self {
        Self {
            keep_english: true,
            ..Self::default()
        }
    }

    /// Cleans one OCR result. Pure; an empty result means nothing usable
    /// was left.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        // Presentation forms fold back to base letters here.
        let text: String = text.nfkc().collect();
        let text = CONTROL_CHARS.replace_all(&text, "");
        let text = ARABIC_DIACRITICS.replace_all(&text, "");
        let text = normalize_arabic_letters(&text);

        let disallowed = if self.keep_english {
            &*DISALLOWED_ARABIC_ENGLISH
        } else {
            &*DISALLOWED_ARABIC
        };
        let mut text = disallowed.replace_all(&text, " ").into_owned();

        if !self.keep_digits {
            text = ASCII_DIGITS.replace_all(&text, " ").into_owned();
        }

        WHITESPACE_RUNS.replace_all(&text, " ").trim().to_string()
    }
}

/// Unifies alef forms, alef maqsura and teh marbuta.
pub fn normalize_arabic_letters(text: &str) -> String {
    ALEF_VARIANTS
        .replace_all(text, "ا")
        .replace('ى', "ي")
        .replace('ة', "ه")
}
