// src/pipeline.rs
//! Stage runners and the sequential orchestrator.
//!
//! Each runner reads one artifact, applies one stage and writes one artifact.
//! Runners only see capabilities; [`StageServices`] decides which concrete
//! clients back them, so tests can run the whole pipeline on fakes.

use crate::algebras::{ClaimClassifier, ImageSource, SearchSource, TextExtractor};
use crate::api::{HttpImageSource, OpenAiClassifier, TwitterApiClient};
use crate::assets::{materialize, MaterializeOptions};
use crate::collector::{fetch_all, CollectOptions};
use crate::config::{ArtifactPaths, PipelineConfig, ServiceSettings};
use crate::constants::{DOWNLOAD_TIMEOUT, OCR_FETCH_TIMEOUT};
use crate::dataset::{read_raw_items, read_rows, write_json};
use crate::error::AppError;
use crate::labeling::{classify_rows, ClassifyOptions};
use crate::media::select_with_images;
use crate::ocr::{enrich_with_text, ExtractOptions, TesseractExtractor};
use crate::types::ValidationError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// The five stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Collect,
    Filter,
    Ocr,
    Label,
    Download,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Collect,
        Stage::Filter,
        Stage::Ocr,
        Stage::Label,
        Stage::Download,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Collect => "collect",
            Stage::Filter => "filter",
            Stage::Ocr => "ocr",
            Stage::Label => "label",
            Stage::Download => "download",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownStage(s.to_string()))
    }
}

/// What a stage did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    /// Items written (collect, filter) or rows worked on (later stages).
    pub processed: usize,
    pub output: PathBuf,
}

impl StageReport {
    fn new(stage: Stage, processed: usize, output: &Path) -> Self {
        Self {
            stage,
            processed,
            output: output.to_path_buf(),
        }
    }
}

/// Input and output artifact of one stage invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageIo {
    /// `None` for collect, which has no input artifact.
    pub input: Option<PathBuf>,
    pub output: PathBuf,
}

impl StageIo {
    /// The chained artifact names under a data directory.
    pub fn defaults(stage: Stage, paths: &ArtifactPaths) -> Self {
        let (input, output) = match stage {
            Stage::Collect => (None, &paths.raw_items),
            Stage::Filter => (Some(&paths.raw_items), &paths.with_images),
            Stage::Ocr => (Some(&paths.with_images), &paths.with_ocr),
            Stage::Label => (Some(&paths.with_ocr), &paths.labeled),
            Stage::Download => (Some(&paths.labeled), &paths.with_local_images),
        };
        Self {
            input: input.cloned(),
            output: output.clone(),
        }
    }

    /// Replaces the defaults with explicitly given paths.
    pub fn with_overrides(mut self, input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if input.is_some() && self.input.is_some() {
            self.input = input;
        }
        if let Some(output) = output {
            self.output = output;
        }
        self
    }

    fn require_input(&self, stage: Stage) -> Result<&Path, AppError> {
        self.input.as_deref().ok_or_else(|| {
            AppError::MissingConfiguration(format!("no input artifact given for {}", stage))
        })
    }
}

/// Builds the capability implementations a stage needs.
///
/// A stage calls only the factories it uses, so credentials for other
/// stages are never required.
pub trait StageServices {
    fn search_source(&self) -> Result<Box<dyn SearchSource>, AppError>;
    fn image_source(&self, timeout: Duration) -> Result<Box<dyn ImageSource>, AppError>;
    fn text_extractor(&self) -> Result<Box<dyn TextExtractor>, AppError>;
    fn claim_classifier(&self) -> Result<Box<dyn ClaimClassifier>, AppError>;
}

/// Network and process backed services configured from the environment.
#[derive(Clone)]
pub struct LiveServices {
    settings: ServiceSettings,
}

impl LiveServices {
    pub fn new(settings: ServiceSettings) -> Self {
        Self { settings }
    }
}

impl StageServices for LiveServices {
    fn search_source(&self) -> Result<Box<dyn SearchSource>, AppError> {
        let key = self.settings.search_api_key()?;
        let proxy = self.settings.search_proxy()?;
        Ok(Box::new(TwitterApiClient::new(&key, proxy.as_ref())?))
    }

    fn image_source(&self, timeout: Duration) -> Result<Box<dyn ImageSource>, AppError> {
        Ok(Box::new(HttpImageSource::new(timeout)?))
    }

    fn text_extractor(&self) -> Result<Box<dyn TextExtractor>, AppError> {
        let extractor =
            TesseractExtractor::new(self.settings.tesseract_cmd(), self.settings.ocr_lang());
        log::info!(
            "Using OCR engine '{}' with language '{}'",
            extractor.command(),
            extractor.lang()
        );
        Ok(Box::new(extractor))
    }

    fn claim_classifier(&self) -> Result<Box<dyn ClaimClassifier>, AppError> {
        let key = self.settings.classifier_api_key()?;
        let mut classifier =
            OpenAiClassifier::new(&key)?.with_model(self.settings.classifier_model());
        if let Some(base_url) = self.settings.classifier_base_url()? {
            classifier = classifier.with_base_url(&base_url);
        }
        log::info!("Using classification model {}", classifier.model());
        Ok(Box::new(classifier))
    }
}

// ---------------------------------------------------------------------------
// Stage runners
// ---------------------------------------------------------------------------

/// Collects posts for `query` and writes them to `output`.
pub fn run_collect<S>(
    source: &S,
    query: &str,
    options: &CollectOptions,
    output: &Path,
) -> Result<StageReport, AppError>
where
    S: SearchSource + ?Sized,
{
    log::info!("Collecting posts for query: {}", query);
    let report = fetch_all(source, query, options);
    log::info!(
        "Collection stopped ({}) after {} page(s): {} unique item(s), {} duplicate(s), {} without id",
        report.stop_reason,
        report.pages_fetched,
        report.items.len(),
        report.duplicates_skipped,
        report.missing_id_skipped
    );

    write_json(output, &report.items)?;
    Ok(StageReport::new(Stage::Collect, report.items.len(), output))
}

/// Keeps posts with at least one photo-like image.
pub fn run_filter(input: &Path, output: &Path) -> Result<StageReport, AppError> {
    let items = read_raw_items(input)?;
    let total = items.len();
    let rows = select_with_images(items);
    log::info!("{} of {} post(s) carry at least one image", rows.len(), total);

    write_json(output, &rows)?;
    Ok(StageReport::new(Stage::Filter, rows.len(), output))
}

/// Attaches extracted image text to every row.
pub fn run_ocr<I, E>(
    input: &Path,
    output: &Path,
    images: &I,
    extractor: &E,
    options: &ExtractOptions,
) -> Result<StageReport, AppError>
where
    I: ImageSource + ?Sized,
    E: TextExtractor + ?Sized,
{
    let mut rows = read_rows(input)?;
    let report = enrich_with_text(&mut rows, images, extractor, options);

    write_json(output, &rows)?;
    Ok(StageReport::new(Stage::Ocr, report.rows_processed, output))
}

/// Labels rows under the call budget.
pub fn run_label<C>(
    input: &Path,
    output: &Path,
    classifier: &C,
    options: &ClassifyOptions,
) -> Result<StageReport, AppError>
where
    C: ClaimClassifier + ?Sized,
{
    let mut rows = read_rows(input)?;
    let report = classify_rows(&mut rows, classifier, options);

    write_json(output, &rows)?;
    Ok(StageReport::new(Stage::Label, report.newly_labeled, output))
}

/// Downloads images, rewrites the image index and writes the rows.
pub fn run_download<I>(
    input: &Path,
    output: &Path,
    images: &I,
    image_dir: &Path,
    index_path: &Path,
    options: &MaterializeOptions,
) -> Result<StageReport, AppError>
where
    I: ImageSource + ?Sized,
{
    let mut rows = read_rows(input)?;
    let report = materialize(&mut rows, images, image_dir, index_path, options)?;

    write_json(output, &rows)?;
    Ok(StageReport::new(Stage::Download, report.rows_processed, output))
}

/// Runs a single stage with capabilities from `services`.
///
/// Capabilities are built before the input is read, so missing credentials
/// stop the stage before any item is touched.
pub fn run_stage(
    stage: Stage,
    io: &StageIo,
    config: &PipelineConfig,
    services: &dyn StageServices,
) -> Result<StageReport, AppError> {
    match stage {
        Stage::Collect => {
            let source = services.search_source()?;
            run_collect(&*source, &config.query, &config.collect, &io.output)
        }
        Stage::Filter => run_filter(io.require_input(stage)?, &io.output),
        Stage::Ocr => {
            let extractor = services.text_extractor()?;
            let images = services.image_source(OCR_FETCH_TIMEOUT)?;
            run_ocr(
                io.require_input(stage)?,
                &io.output,
                &*images,
                &*extractor,
                &config.extract,
            )
        }
        Stage::Label => {
            let classifier = services.claim_classifier()?;
            run_label(
                io.require_input(stage)?,
                &io.output,
                &*classifier,
                &config.classify,
            )
        }
        Stage::Download => {
            let images = services.image_source(DOWNLOAD_TIMEOUT)?;
            run_download(
                io.require_input(stage)?,
                &io.output,
                &*images,
                &config.paths.image_dir,
                &config.paths.image_index,
                &config.materialize,
            )
        }
    }
}

/// Runs every stage from `from` onwards, chaining the default artifacts.
///
/// The first stage-fatal error ends the run; the error names the stage.
pub fn run_pipeline(
    from: Stage,
    config: &PipelineConfig,
    services: &dyn StageServices,
) -> Result<Vec<StageReport>, AppError> {
    let mut reports = Vec::new();

    for stage in Stage::ALL.into_iter().filter(|stage| *stage >= from) {
        log::info!("=== Stage: {} ===", stage);
        let io = StageIo::defaults(stage, &config.paths);
        let report = run_stage(stage, &io, config, services).map_err(|e| {
            log::error!("Stage {} failed: {}", stage, e);
            e.in_stage(stage.as_str())
        })?;
        log::info!(
            "Stage {} finished: {} item(s) -> {}",
            stage,
            report.processed,
            report.output.display()
        );
        reports.push(report);
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stage_names() {
        assert_eq!("OCR".parse::<Stage>().unwrap(), Stage::Ocr);
        assert_eq!(" download ".parse::<Stage>().unwrap(), Stage::Download);
        assert!(matches!(
            "upload".parse::<Stage>(),
            Err(ValidationError::UnknownStage(_))
        ));
        assert!(Stage::Filter < Stage::Label);
    }

    #[test]
    fn test_default_io_chains_stages() {
        let paths = ArtifactPaths::under(Path::new("data"));
        for pair in Stage::ALL.windows(2) {
            let upstream = StageIo::defaults(pair[0], &paths);
            let downstream = StageIo::defaults(pair[1], &paths);
            assert_eq!(downstream.input.as_ref(), Some(&upstream.output));
        }
        assert_eq!(StageIo::defaults(Stage::Collect, &paths).input, None);
    }

    #[test]
    fn test_overrides() {
        let paths = ArtifactPaths::under(Path::new("data"));
        let io = StageIo::defaults(Stage::Label, &paths)
            .with_overrides(Some(PathBuf::from("in.json")), None);
        assert_eq!(io.input, Some(PathBuf::from("in.json")));
        assert_eq!(io.output, paths.labeled);

        let io = StageIo::defaults(Stage::Collect, &paths)
            .with_overrides(Some(PathBuf::from("ignored.json")), Some(PathBuf::from("raw.json")));
        assert_eq!(io.input, None);
        assert_eq!(io.output, PathBuf::from("raw.json"));
    }

    #[test]
    fn test_missing_input_stops_filter() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_filter(&dir.path().join("raw.json"), &dir.path().join("out.json"))
            .unwrap_err();
        assert!(err.is_stage_fatal());
        assert!(!dir.path().join("out.json").exists());
    }
}
