// src/config.rs
use crate::assets::MaterializeOptions;
use crate::collector::CollectOptions;
use crate::constants::{
    DEFAULT_CLASSIFIER_MODEL, DEFAULT_HEALTH_QUERY, DEFAULT_OCR_LANG, DEFAULT_TESSERACT_CMD,
    IMAGE_DIR, IMAGE_INDEX_FILE, ITEMS_WITH_IMAGES_FILE, ITEMS_WITH_LOCAL_IMAGES_FILE,
    ITEMS_WITH_OCR_FILE, LABELED_ITEMS_FILE, RAW_ITEMS_FILE,
};
use crate::error::AppError;
use crate::labeling::ClassifyOptions;
use crate::ocr::{CleaningRules, ExtractOptions};
use crate::types::{ApiKey, ValidatedUrl};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Directory holding the artifact files
    #[arg(short = 'd', long, global = true, default_value = ".")]
    pub data_dir: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, default_value_t = false, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for posts and save the raw results
    Collect {
        #[command(flatten)]
        params: CollectParams,
        /// Raw items file (default: <data-dir>/raw_health_tweets.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Keep posts with at least one photo and project them onto rows
    Filter {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract text from every image
    Ocr {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        params: OcrParams,
    },

    /// Classify the main health claim of every row
    Label {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        params: LabelParams,
    },

    /// Download images locally and write the image index
    Download {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        params: DownloadParams,
        /// Directory for image files (default: <data-dir>/tweet_images)
        #[arg(long)]
        image_dir: Option<PathBuf>,
        /// Image index file (default: <data-dir>/images_index.csv)
        #[arg(long)]
        index: Option<PathBuf>,
    },

    /// Run every stage in order
    Run {
        /// First stage to run (collect, filter, ocr, label, download)
        #[arg(long)]
        from: Option<String>,
        #[command(flatten)]
        collect: CollectParams,
        #[command(flatten)]
        ocr: OcrParams,
        #[command(flatten)]
        label: LabelParams,
        #[command(flatten)]
        download: DownloadParams,
    },

    /// Print a summary of any row artifact
    Stats {
        /// Artifact file to summarize
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct CollectParams {
    /// Search query (defaults to the Arabic health-claim query)
    #[arg(long)]
    pub query: Option<String>,

    /// Stop once this many unique posts are collected
    #[arg(long)]
    pub target: Option<usize>,

    /// Stop after this many pages
    #[arg(long)]
    pub max_pages: Option<u32>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OcrParams {
    /// Leave rows that already carry OCR text untouched
    #[arg(long, default_value_t = false)]
    pub skip_processed: bool,

    /// Keep Latin letters in the cleaned text
    #[arg(long, default_value_t = false)]
    pub keep_english: bool,

    /// Remove digits from the cleaned text
    #[arg(long, default_value_t = false)]
    pub drop_digits: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LabelParams {
    /// Maximum classifier calls in this run
    #[arg(long)]
    pub max_new_calls: Option<usize>,

    /// Leave rows that already carry a label untouched
    #[arg(long, default_value_t = false)]
    pub skip_labeled: bool,

    /// Pause between classifier calls, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DownloadParams {
    /// Only download images for the first N rows
    #[arg(long)]
    pub max_rows: Option<usize>,
}

impl CollectParams {
    pub fn query(&self) -> &str {
        self.query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .unwrap_or(DEFAULT_HEALTH_QUERY)
    }

    pub fn options(&self) -> CollectOptions {
        CollectOptions {
            target_count: self.target,
            max_pages: self.max_pages,
            ..CollectOptions::default()
        }
    }
}

impl OcrParams {
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            rules: CleaningRules {
                keep_english: self.keep_english,
                keep_digits: !self.drop_digits,
            },
            skip_processed: self.skip_processed,
        }
    }
}

impl LabelParams {
    pub fn options(&self) -> ClassifyOptions {
        ClassifyOptions {
            max_new_calls: self.max_new_calls,
            skip_if_labeled: self.skip_labeled,
            inter_call_delay: Duration::from_millis(self.delay_ms),
        }
    }
}

impl DownloadParams {
    pub fn options(&self) -> MaterializeOptions {
        MaterializeOptions {
            max_rows: self.max_rows,
        }
    }
}

/// Where every stage reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub raw_items: PathBuf,
    pub with_images: PathBuf,
    pub with_ocr: PathBuf,
    pub labeled: PathBuf,
    pub with_local_images: PathBuf,
    pub image_dir: PathBuf,
    pub image_index: PathBuf,
}

impl ArtifactPaths {
    /// Default file names under `data_dir`.
    pub fn under(data_dir: &Path) -> Self {
        Self {
            raw_items: data_dir.join(RAW_ITEMS_FILE),
            with_images: data_dir.join(ITEMS_WITH_IMAGES_FILE),
            with_ocr: data_dir.join(ITEMS_WITH_OCR_FILE),
            labeled: data_dir.join(LABELED_ITEMS_FILE),
            with_local_images: data_dir.join(ITEMS_WITH_LOCAL_IMAGES_FILE),
            image_dir: data_dir.join(IMAGE_DIR),
            image_index: data_dir.join(IMAGE_INDEX_FILE),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::under(Path::new("."))
    }
}

/// Credentials and engine settings read from the environment.
///
/// Nothing is validated up front: each stage asks only for what it uses, so
/// `filter` runs without any key and `ocr` runs without the classifier key.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ServiceSettings {
    pub twitterapi_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub openai_base_url: Option<String>,
    pub tesseract_cmd: Option<String>,
    pub ocr_lang: Option<String>,
    pub search_proxy_url: Option<String>,
}

impl ServiceSettings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            twitterapi_key: get("TWITTERAPI_KEY"),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL"),
            openai_base_url: get("OPENAI_BASE_URL"),
            tesseract_cmd: get("TESSERACT_CMD"),
            ocr_lang: get("OCR_LANG"),
            search_proxy_url: get("SEARCH_PROXY_URL"),
        }
    }

    pub fn search_api_key(&self) -> Result<ApiKey, AppError> {
        required_key(self.twitterapi_key.as_deref(), "TWITTERAPI_KEY")
    }

    pub fn classifier_api_key(&self) -> Result<ApiKey, AppError> {
        required_key(self.openai_api_key.as_deref(), "OPENAI_API_KEY")
    }

    pub fn classifier_model(&self) -> &str {
        self.openai_model
            .as_deref()
            .unwrap_or(DEFAULT_CLASSIFIER_MODEL)
    }

    pub fn classifier_base_url(&self) -> Result<Option<ValidatedUrl>, AppError> {
        optional_url(self.openai_base_url.as_deref())
    }

    pub fn search_proxy(&self) -> Result<Option<ValidatedUrl>, AppError> {
        optional_url(self.search_proxy_url.as_deref())
    }

    pub fn tesseract_cmd(&self) -> &str {
        self.tesseract_cmd.as_deref().unwrap_or(DEFAULT_TESSERACT_CMD)
    }

    pub fn ocr_lang(&self) -> &str {
        self.ocr_lang.as_deref().unwrap_or(DEFAULT_OCR_LANG)
    }
}

fn required_key(value: Option<&str>, name: &str) -> Result<ApiKey, AppError> {
    let raw = value.ok_or_else(|| {
        AppError::MissingConfiguration(format!("{} environment variable not set", name))
    })?;
    Ok(ApiKey::new(raw)?)
}

fn optional_url(value: Option<&str>) -> Result<Option<ValidatedUrl>, AppError> {
    value
        .map(ValidatedUrl::parse)
        .transpose()
        .map_err(AppError::from)
}

/// Resolved configuration for a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub paths: ArtifactPaths,
    pub query: String,
    pub collect: CollectOptions,
    pub extract: ExtractOptions,
    pub classify: ClassifyOptions,
    pub materialize: MaterializeOptions,
}

impl PipelineConfig {
    /// Builds the run configuration from the `run` subcommand's parameters.
    pub fn resolve(
        data_dir: &Path,
        collect: &CollectParams,
        ocr: &OcrParams,
        label: &LabelParams,
        download: &DownloadParams,
    ) -> Self {
        Self {
            paths: ArtifactPaths::under(data_dir),
            query: collect.query().to_string(),
            collect: collect.options(),
            extract: ocr.options(),
            classify: label.options(),
            materialize: download.options(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            paths: ArtifactPaths::default(),
            query: DEFAULT_HEALTH_QUERY.to_string(),
            collect: CollectOptions::default(),
            extract: ExtractOptions::default(),
            classify: ClassifyOptions::default(),
            materialize: MaterializeOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> ServiceSettings {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceSettings::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let s = settings(&[("OPENAI_API_KEY", "   ")]);
        let err = s.classifier_api_key().unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
        assert!(s.search_api_key().is_err());
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]);
        assert_eq!(s.classifier_model(), "gpt-4.1-mini");
        assert_eq!(s.tesseract_cmd(), "tesseract");
        assert_eq!(s.ocr_lang(), "eng");
        assert_eq!(s.search_proxy().unwrap(), None);
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            ("OCR_LANG", "ara+eng"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("SEARCH_PROXY_URL", "http://127.0.0.1:8080"),
        ]);
        assert_eq!(s.ocr_lang(), "ara+eng");
        assert_eq!(s.classifier_model(), "gpt-4o");
        assert!(s.search_proxy().unwrap().is_some());
    }

    #[test]
    fn test_artifact_paths() {
        let paths = ArtifactPaths::under(Path::new("data"));
        assert_eq!(paths.raw_items, PathBuf::from("data/raw_health_tweets.json"));
        assert_eq!(paths.image_dir, PathBuf::from("data/tweet_images"));
        assert_eq!(paths.image_index, PathBuf::from("data/images_index.csv"));
    }

    #[test]
    fn test_cli_parsing() {
        let cli = CommandLineInput::parse_from([
            "healthclaims",
            "-d",
            "out",
            "label",
            "--max-new-calls",
            "5",
            "--skip-labeled",
            "--delay-ms",
            "500",
        ]);
        assert_eq!(cli.data_dir, PathBuf::from("out"));
        match cli.command {
            Command::Label { params, input, .. } => {
                let options = params.options();
                assert_eq!(options.max_new_calls, Some(5));
                assert!(options.skip_if_labeled);
                assert_eq!(options.inter_call_delay, Duration::from_millis(500));
                assert_eq!(input, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_run_defaults_process_everything() {
        let cli = CommandLineInput::parse_from(["healthclaims", "run", "--from", "ocr"]);
        match cli.command {
            Command::Run {
                from,
                collect,
                ocr,
                label,
                download,
            } => {
                assert_eq!(from.as_deref(), Some("ocr"));
                let config =
                    PipelineConfig::resolve(Path::new("."), &collect, &ocr, &label, &download);
                assert_eq!(config.collect.target_count, None);
                assert_eq!(config.classify.max_new_calls, None);
                assert_eq!(config.materialize.max_rows, None);
                assert!(config.extract.rules.keep_digits);
                assert_eq!(config.query, DEFAULT_HEALTH_QUERY);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
