//! Capability algebras for the dataset pipeline.
//!
//! This module defines traits that represent **capabilities**, not
//! implementations. Each trait is:
//!
//! - **Object-safe**: can be used as `dyn Trait`
//! - **Blocking**: the pipeline is single-threaded and sequential
//! - **Documented with laws**: properties that all implementations must satisfy
//!
//! # Architecture
//!
//! ```text
//! Stages (collector/, media, ocr/, labeling/, assets/)
//!         ↓
//! Capabilities (algebras/)
//!         ↓
//! Interpreters (api/, ocr::TesseractExtractor)
//! ```
//!
//! # Capability Traits
//!
//! - [`SearchSource`]: cursor-paginated post search
//! - [`ImageSource`]: image bytes behind a URL
//! - [`TextExtractor`]: text inside an image
//! - [`ClaimClassifier`]: verdict on a post's health claim

pub mod classify;
pub mod error;
pub mod search;
pub mod vision;

pub use classify::{ClaimClassifier, ClaimRequest};
pub use error::CapabilityError;
pub use search::{SearchPage, SearchSource};
pub use vision::{ImageSource, TextExtractor};
