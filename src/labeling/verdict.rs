// src/labeling/verdict.rs
//! Validated classification results.

use crate::constants::MISSING_JUSTIFICATION;
use crate::types::Label;
use serde_json::Value;

/// A label with its justification and cited sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub label: Label,
    pub justification: String,
    pub sources: Vec<String>,
}

impl Verdict {
    /// Validates raw classifier output.
    ///
    /// Missing or unknown labels become `unverified`; a missing
    /// justification gets a placeholder; `sources` must be a list, and
    /// only its string entries are kept. Never fails.
    pub fn from_model_output(output: &Value) -> Self {
        let label = match output.get("label") {
            Some(Value::String(raw)) => Label::coerce(raw),
            _ => Label::Unverified,
        };

        let justification = match output.get("justification") {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => MISSING_JUSTIFICATION.to_string(),
            Some(other) => other.to_string(),
        };

        let sources = match output.get("sources") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            label,
            justification,
            sources,
        }
    }

    /// The safe default recorded when classification fails.
    pub fn fallback(reason: &str) -> Self {
        Self {
            label: Label::Unverified,
            justification: format!("Labeling error: {}", reason),
            sources: Vec::new(),
        }
    }
}

/// Result of one classification attempt. Both branches end labeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationOutcome {
    Labeled(Verdict),
    Fallback { reason: String },
}

impl ClassificationOutcome {
    pub fn into_verdict(self) -> Verdict {
        match self {
            Self::Labeled(verdict) => verdict,
            Self::Fallback { reason } => Verdict::fallback(&reason),
        }
    }
}
