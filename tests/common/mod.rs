// tests/common/mod.rs
//! In-memory capabilities shared by the integration tests.

#![allow(dead_code)]

use healthclaims::collector::parse_search_body;
use healthclaims::{
    AppError, CapabilityError, ClaimClassifier, ClaimRequest, ImageSource, SearchPage,
    SearchSource, ServiceStatus, StageServices, TextExtractor,
};
use serde_json::{json, Value};
use std::cell::Cell;
use std::time::Duration;

pub const PAGE_1: &str = include_str!("../fixtures/search/page_1.json");
pub const PAGE_2: &str = include_str!("../fixtures/search/page_2.json");
pub const PAGE_1_CURSOR: &str = "DAACCgACGdy";

/// Serves the two fixture pages, keyed by cursor.
pub struct FixtureSearch {
    pub calls: Cell<usize>,
}

impl FixtureSearch {
    pub fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl SearchSource for FixtureSearch {
    fn search(&self, _query: &str, cursor: Option<&str>) -> Result<SearchPage, CapabilityError> {
        self.calls.set(self.calls.get() + 1);
        let body = match cursor {
            None => PAGE_1,
            Some(PAGE_1_CURSOR) => PAGE_2,
            Some(other) => {
                return Err(CapabilityError::Service {
                    status: ServiceStatus::NotFound,
                    message: format!("unknown cursor {}", other),
                })
            }
        };
        parse_search_body(body).map_err(CapabilityError::from)
    }
}

/// Returns the URL itself as the image bytes. URLs containing "GeX1b" are
/// unreachable.
pub struct EchoImages;

impl ImageSource for EchoImages {
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, CapabilityError> {
        if url.contains("GeX1b") {
            return Err(CapabilityError::Timeout {
                operation: url.to_string(),
            });
        }
        Ok(url.as_bytes().to_vec())
    }
}

/// Reads fixed text out of known images; everything else is blank.
pub struct FixtureOcr;

impl TextExtractor for FixtureOcr {
    fn extract_text(&self, image: &[u8]) -> Result<String, CapabilityError> {
        let url = String::from_utf8_lossy(image);
        if url.contains("GeX1a") {
            Ok("يُشفي السكري فوراً!!".to_string())
        } else {
            Ok(String::new())
        }
    }
}

/// Judges posts about diabetes as false; fails on everything else.
pub struct DiabetesJudge {
    pub calls: Cell<usize>,
}

impl DiabetesJudge {
    pub fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl ClaimClassifier for DiabetesJudge {
    fn classify(&self, request: &ClaimRequest<'_>) -> Result<Value, CapabilityError> {
        self.calls.set(self.calls.get() + 1);
        if request.text.contains("السكري") {
            Ok(json!({
                "label": " FALSE ",
                "justification": "لا يوجد دليل على أن الكركم يعالج السكري.",
                "sources": ["WHO", 3, "Ministry of Health"]
            }))
        } else {
            Err(CapabilityError::Timeout {
                operation: "chat completion".to_string(),
            })
        }
    }
}

/// Hands out the fixture capabilities.
pub struct FakeServices;

impl StageServices for FakeServices {
    fn search_source(&self) -> Result<Box<dyn SearchSource>, AppError> {
        Ok(Box::new(FixtureSearch::new()))
    }

    fn image_source(&self, _timeout: Duration) -> Result<Box<dyn ImageSource>, AppError> {
        Ok(Box::new(EchoImages))
    }

    fn text_extractor(&self) -> Result<Box<dyn TextExtractor>, AppError> {
        Ok(Box::new(FixtureOcr))
    }

    fn claim_classifier(&self) -> Result<Box<dyn ClaimClassifier>, AppError> {
        Ok(Box::new(DiabetesJudge::new()))
    }
}
