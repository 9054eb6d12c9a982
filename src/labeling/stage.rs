// src/labeling/stage.rs
//! Classification stage: label rows under a per-run call budget.

use super::claims::ClaimFlags;
use super::verdict::{ClassificationOutcome, Verdict};
use crate::algebras::{ClaimClassifier, ClaimRequest};
use crate::model::Row;
use std::thread;
use std::time::Duration;

/// Options for one classification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Cap on classifier calls in this run; `None` means no cap.
    pub max_new_calls: Option<usize>,
    /// Leave rows that already carry a label untouched.
    pub skip_if_labeled: bool,
    /// Pause between consecutive calls.
    pub inter_call_delay: Duration,
}

/// Counters for one classification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationReport {
    /// Rows that received a label in this run, fallbacks included.
    pub newly_labeled: usize,
    pub fallbacks: usize,
    pub skipped_labeled: usize,
    /// Rows left alone because the budget ran out.
    pub deferred: usize,
    pub claim_flagged: usize,
}

/// Run-scoped call counter.
#[derive(Debug)]
struct CallBudget {
    limit: Option<usize>,
    used: usize,
}

impl CallBudget {
    fn new(limit: Option<usize>) -> Self {
        Self { limit, used: 0 }
    }

    fn exhausted(&self) -> bool {
        self.limit.is_some_and(|limit| self.used >= limit)
    }

    fn spend(&mut self) {
        self.used += 1;
    }
}

/// Classifies one row, turning any failure into a fallback outcome.
pub fn classify_one<C>(classifier: &C, row: &Row) -> ClassificationOutcome
where
    C: ClaimClassifier + ?Sized,
{
    let request = ClaimRequest::new(row.text_or_empty(), row.extracted_text_or_empty());
    match classifier.classify(&request) {
        Ok(output) => ClassificationOutcome::Labeled(Verdict::from_model_output(&output)),
        Err(e) => ClassificationOutcome::Fallback {
            reason: e.to_string(),
        },
    }
}

fn apply_verdict(row: &mut Row, verdict: Verdict) {
    row.label = Some(verdict.label);
    row.label_justification = Some(verdict.justification);
    row.label_sources = Some(verdict.sources);
}

/// Labels rows in order until the call budget runs out.
///
/// Claim flags are stored on every row, whether or not it is classified.
/// Every attempt counts against the budget, including attempts that end in
/// a fallback. Skipped rows do not count. Rows are never removed.
pub fn classify_rows<C>(
    rows: &mut [Row],
    classifier: &C,
    options: &ClassifyOptions,
) -> ClassificationReport
where
    C: ClaimClassifier + ?Sized,
{
    let total = rows.len();
    let mut budget = CallBudget::new(options.max_new_calls);
    let mut report = ClassificationReport::default();
    let mut budget_logged = false;

    for (idx, row) in rows.iter_mut().enumerate() {
        let flags = ClaimFlags::compute(row.text_or_empty(), row.extracted_text_or_empty());
        row.has_claim_pattern = Some(flags.has_claim_pattern);
        row.is_strong_claim = Some(flags.is_strong_claim);
        if flags.has_claim_pattern {
            report.claim_flagged += 1;
        }

        if budget.exhausted() {
            if !budget_logged {
                log::info!(
                    "Reached max_new_calls={} classifier calls; remaining rows are kept unlabeled",
                    budget.used
                );
                budget_logged = true;
            }
            report.deferred += 1;
            continue;
        }

        if options.skip_if_labeled && row.is_labeled() {
            log::info!(
                "[{}/{}] Skipping tweet_id={}: already labeled",
                idx + 1,
                total,
                row.display_id()
            );
            report.skipped_labeled += 1;
            continue;
        }

        if budget.used > 0 && !options.inter_call_delay.is_zero() {
            thread::sleep(options.inter_call_delay);
        }

        log::info!("[{}/{}] Labeling tweet_id={}", idx + 1, total, row.display_id());
        let outcome = classify_one(classifier, row);
        budget.spend();

        if let ClassificationOutcome::Fallback { reason } = &outcome {
            log::warn!("  - Error labeling tweet_id={}: {}", row.display_id(), reason);
            report.fallbacks += 1;
        }
        apply_verdict(row, outcome.into_verdict());
        report.newly_labeled += 1;
    }

    log::info!(
        "Labeled {} of {} row(s) ({} fallback, {} skipped, {} deferred)",
        report.newly_labeled,
        total,
        report.fallbacks,
        report.skipped_labeled,
        report.deferred
    );
    report
}
