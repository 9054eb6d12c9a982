// tests/pipeline_flow.rs
//! End-to-end runs of the orchestrator over fixture capabilities.

mod common;

use common::FakeServices;
use healthclaims::dataset::read_rows;
use healthclaims::{
    run_pipeline, summarize, AppError, ArtifactPaths, Label, LiveServices, PipelineConfig,
    ServiceSettings, Stage,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::time::Duration;

fn config_under(dir: &Path) -> PipelineConfig {
    let mut config = PipelineConfig {
        paths: ArtifactPaths::under(dir),
        ..PipelineConfig::default()
    };
    config.collect.initial_backoff = Duration::ZERO;
    config.collect.max_backoff = Duration::ZERO;
    config
}

#[test]
fn test_full_run_produces_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_under(dir.path());

    let reports = run_pipeline(Stage::Collect, &config, &FakeServices).unwrap();
    let stages: Vec<Stage> = reports.iter().map(|r| r.stage).collect();
    assert_eq!(stages, Stage::ALL.to_vec());
    assert_eq!(reports[0].processed, 3);
    assert_eq!(reports[1].processed, 2);

    let paths = &config.paths;
    for artifact in [
        &paths.raw_items,
        &paths.with_images,
        &paths.with_ocr,
        &paths.labeled,
        &paths.with_local_images,
        &paths.image_index,
    ] {
        assert!(artifact.is_file(), "missing {}", artifact.display());
    }

    let rows = read_rows(&paths.with_local_images).unwrap();
    assert_eq!(rows.len(), 2);

    // First post: one image readable, one unreachable.
    let cure = &rows[0];
    assert_eq!(cure.ocr_texts, Some(vec!["يشفي السكري فورا!!".to_string()]));
    assert_eq!(cure.label, Some(Label::False));
    assert_eq!(
        cure.label_sources,
        Some(vec!["WHO".to_string(), "Ministry of Health".to_string()])
    );
    assert_eq!(cure.has_claim_pattern, Some(true));
    assert_eq!(cure.is_strong_claim, Some(true));
    let local = cure.image_paths.clone().unwrap();
    assert_eq!(local.len(), 1);
    assert!(local[0].ends_with("1866412005119721800_0.jpg"));

    // Second post: blank image, classifier failure.
    let news = &rows[1];
    assert_eq!(news.ocr_texts, Some(vec![]));
    assert_eq!(news.ocr_text_combined.as_deref(), Some(""));
    assert_eq!(news.label, Some(Label::Unverified));
    assert!(news
        .label_justification
        .as_deref()
        .unwrap()
        .starts_with("Labeling error: "));
    assert_eq!(news.has_claim_pattern, Some(false));
    assert!(news.image_paths.clone().unwrap()[0].ends_with("1866000000000000002_0.webp"));

    let index = fs::read_to_string(&paths.image_index).unwrap();
    assert_eq!(index.lines().count(), 3);

    let summary = summarize(&rows);
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.labeled(), 2);
    assert_eq!(summary.materialized_images, 2);
    assert_eq!(summary.label_count(Label::False), 1);
}

#[test]
fn test_rerun_from_download_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_under(dir.path());
    run_pipeline(Stage::Collect, &config, &FakeServices).unwrap();

    let first_index = fs::read_to_string(&config.paths.image_index).unwrap();
    let first_rows = fs::read_to_string(&config.paths.with_local_images).unwrap();

    let reports = run_pipeline(Stage::Download, &config, &FakeServices).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(fs::read_to_string(&config.paths.image_index).unwrap(), first_index);
    assert_eq!(
        fs::read_to_string(&config.paths.with_local_images).unwrap(),
        first_rows
    );
}

#[test]
fn test_missing_input_names_the_stage() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_under(dir.path());

    let err = run_pipeline(Stage::Ocr, &config, &FakeServices).unwrap_err();
    match &err {
        AppError::StageFailed { stage, source } => {
            assert_eq!(stage, "ocr");
            assert!(matches!(**source, AppError::InputNotFound { .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.is_stage_fatal());
    assert!(!config.paths.with_ocr.exists());
    assert!(!config.paths.labeled.exists());
}

#[test]
fn test_missing_credentials_stop_before_any_row() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_under(dir.path());
    fs::write(&config.paths.with_ocr, "[{\"tweet_id\": \"1\", \"image_urls\": []}]").unwrap();

    let services = LiveServices::new(ServiceSettings::default());
    let err = run_pipeline(Stage::Label, &config, &services).unwrap_err();

    match err {
        AppError::StageFailed { stage, source } => {
            assert_eq!(stage, "label");
            assert!(matches!(*source, AppError::MissingConfiguration(_)));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!config.paths.labeled.exists());
}
