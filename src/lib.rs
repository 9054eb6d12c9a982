// src/lib.rs
//! healthclaims library: builds a labeled dataset of image-bearing health-claim posts.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `CapabilityError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `PipelineConfig`, `ServiceSettings`
//! - **Domain model**: `Row`, `RawItem`, `Label`, `ItemId`
//! - **Capabilities**: `SearchSource`, `ImageSource`, `TextExtractor`, `ClaimClassifier`
//! - **Stages**: `fetch_all`, `select_with_images`, `enrich_with_text`,
//!   `classify_rows`, `materialize`
//! - **Orchestration**: `Stage`, `run_pipeline`, `DatasetSummary`

pub mod algebras;
pub mod analytics;
pub mod api;
pub mod assets;
pub mod collector;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod error_recovery;
pub mod labeling;
pub mod media;
pub mod model;
pub mod ocr;
pub mod pipeline;
pub mod types;

// --- Error Handling ---
pub use crate::algebras::CapabilityError;
pub use crate::error::{AppError, ServiceStatus};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{ArtifactPaths, CommandLineInput, PipelineConfig, ServiceSettings};

// --- Domain Model ---
pub use crate::model::{RawItem, Row};
pub use crate::types::{ApiKey, ItemId, Label, ValidatedUrl};

// --- Capabilities ---
pub use crate::algebras::{
    ClaimClassifier, ClaimRequest, ImageSource, SearchPage, SearchSource, TextExtractor,
};

// --- Stages ---
pub use crate::assets::{materialize, MaterializeOptions, MaterializeReport};
pub use crate::collector::{fetch_all, CollectOptions, CollectionReport, StopReason};
pub use crate::labeling::{classify_rows, ClassificationReport, ClassifyOptions};
pub use crate::media::{extract_image_urls, select_with_images};
pub use crate::ocr::{enrich_with_text, CleaningRules, ExtractOptions, ExtractionReport};

// --- Orchestration ---
pub use crate::analytics::{summarize, DatasetSummary};
pub use crate::pipeline::{
    run_pipeline, run_stage, LiveServices, Stage, StageIo, StageReport, StageServices,
};
