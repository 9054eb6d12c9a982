// src/labeling/mod.rs
//! Classification stage: claim-pattern flags, verdict validation and the
//! budgeted labeling loop.

mod claims;
pub mod prompt;
mod stage;
mod verdict;

pub use claims::{looks_like_claim, ClaimFlags};
pub use stage::{classify_one, classify_rows, ClassificationReport, ClassifyOptions};
pub use verdict::{ClassificationOutcome, Verdict};
