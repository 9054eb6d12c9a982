// src/collector/pagination.rs
//! Cursor pagination with per-run deduplication and bounded retries.

use super::CollectOptions;
use crate::algebras::{CapabilityError, SearchSource};
use crate::error_recovery::retry_with_backoff;
use crate::model::{schema, RawItem};
use crate::types::ItemId;
use std::collections::HashSet;
use std::fmt;

/// Why a collection run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Enough unique items were accumulated.
    TargetReached,
    /// The page budget was spent.
    PageLimit,
    /// The last page carried no continuation cursor.
    Exhausted,
    /// A page came back with zero items.
    EmptyPage,
    /// A page could not be fetched within the retry bound, or failed in a
    /// way retrying cannot fix.
    RetriesExhausted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::TargetReached => "target count reached",
            Self::PageLimit => "page limit reached",
            Self::Exhausted => "no more pages (no next cursor)",
            Self::EmptyPage => "page contained 0 items",
            Self::RetriesExhausted => "max retries reached",
        };
        f.write_str(text)
    }
}

/// Outcome of a collection run. Partial results are valid results.
#[derive(Debug, Clone)]
pub struct CollectionReport {
    /// Unique items in first-seen order.
    pub items: Vec<RawItem>,
    pub pages_fetched: u32,
    pub duplicates_skipped: usize,
    pub missing_id_skipped: usize,
    pub stop_reason: StopReason,
}

/// Run-scoped deduplication state.
#[derive(Debug, Default)]
struct SeenIds(HashSet<ItemId>);

impl SeenIds {
    /// Returns `true` the first time an id is offered.
    fn first_sighting(&mut self, id: ItemId) -> bool {
        self.0.insert(id)
    }
}

/// Pages through `source` until the target, the page budget, the end of
/// the result set, or the retry bound is hit.
///
/// Never fails: when a page cannot be fetched after `max_attempts` tries,
/// the run stops and returns whatever was accumulated.
pub fn fetch_all<S>(source: &S, query: &str, options: &CollectOptions) -> CollectionReport
where
    S: SearchSource + ?Sized,
{
    let mut seen = SeenIds::default();
    let mut items: Vec<RawItem> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages_fetched = 0u32;
    let mut duplicates_skipped = 0usize;
    let mut missing_id_skipped = 0usize;

    let stop_reason = loop {
        if let Some(target) = options.target_count {
            if items.len() >= target {
                break StopReason::TargetReached;
            }
        }
        if let Some(max) = options.max_pages {
            if pages_fetched >= max {
                log::debug!("Reached maximum page limit: {}", max);
                break StopReason::PageLimit;
            }
        }

        let page_number = pages_fetched + 1;
        let fetched = retry_with_backoff(
            |attempt| {
                log::debug!("Fetching page {} (attempt {})", page_number, attempt);
                source.search(query, cursor.as_deref())
            },
            CapabilityError::is_retryable,
            options.max_attempts,
            options.initial_backoff,
            options.max_backoff,
        );

        let page = match fetched {
            Ok(page) => page,
            Err(e) => {
                log::error!(
                    "Request error on page {}: {}. Max retries reached, stopping collection.",
                    page_number,
                    e
                );
                break StopReason::RetriesExhausted;
            }
        };
        pages_fetched = page_number;

        let raw_count = page.items.len();
        let can_continue = page.can_continue();
        let mut new_count = 0usize;
        for item in page.items {
            match schema::item_id(&item) {
                Some(id) => {
                    if seen.first_sighting(id) {
                        items.push(item);
                        new_count += 1;
                    } else {
                        duplicates_skipped += 1;
                    }
                }
                None => missing_id_skipped += 1,
            }
        }

        log::info!(
            "Page {}: raw={}, new={}, total={}",
            page_number,
            raw_count,
            new_count,
            items.len()
        );

        if raw_count == 0 {
            break StopReason::EmptyPage;
        }
        if !can_continue {
            break StopReason::Exhausted;
        }
        cursor = page.next_cursor;
    };

    log::info!(
        "Collection stopped: {} ({} items from {} pages)",
        stop_reason,
        items.len(),
        pages_fetched
    );

    CollectionReport {
        items,
        pages_fetched,
        duplicates_skipped,
        missing_id_skipped,
        stop_reason,
    }
}
