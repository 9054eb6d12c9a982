//! Classification capability: judging the main health claim of a post.

use super::error::CapabilityError;
use serde_json::Value;

/// What the classifier gets to see about one post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimRequest<'a> {
    pub text: &'a str,
    pub extracted_text: &'a str,
    pub extra_context: Option<&'a str>,
}

impl<'a> ClaimRequest<'a> {
    pub fn new(text: &'a str, extracted_text: &'a str) -> Self {
        Self {
            text,
            extracted_text,
            extra_context: None,
        }
    }
}

/// The ability to classify a post's health claim.
///
/// Implementations return the classifier's structured output as-is: a JSON
/// object that *should* carry `label`, `justification` and `sources`. The
/// output of a generative model is not guaranteed to be well formed, so
/// callers validate it (see [`crate::labeling::Verdict::from_model_output`]).
pub trait ClaimClassifier {
    fn classify(&self, request: &ClaimRequest<'_>) -> Result<Value, CapabilityError>;
}

impl<T: ClaimClassifier + ?Sized> ClaimClassifier for &T {
    fn classify(&self, request: &ClaimRequest<'_>) -> Result<Value, CapabilityError> {
        (**self).classify(request)
    }
}
