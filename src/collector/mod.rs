// src/collector/mod.rs
//! Collection stage: paginated keyword search with deduplication.
//!
//! The collector only knows about the [`SearchSource`](crate::algebras::SearchSource)
//! capability. The HTTP client lives in [`crate::api`].

mod pagination;
mod parser;

pub use pagination::{fetch_all, CollectionReport, StopReason};
pub use parser::{parse_search_body, parse_search_page};

use crate::constants::{SEARCH_INITIAL_BACKOFF, SEARCH_MAX_ATTEMPTS, SEARCH_MAX_BACKOFF};
use std::time::Duration;

/// Bounds for one collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectOptions {
    /// Stop once at least this many unique items are held.
    pub target_count: Option<usize>,
    /// Stop after this many successfully fetched pages.
    pub max_pages: Option<u32>,
    /// Attempts per page before the run is cut short.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            target_count: None,
            max_pages: None,
            max_attempts: SEARCH_MAX_ATTEMPTS,
            initial_backoff: SEARCH_INITIAL_BACKOFF,
            max_backoff: SEARCH_MAX_BACKOFF,
        }
    }
}
