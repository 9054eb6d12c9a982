// src/assets/stage.rs
//! Asset-materialization stage: download images once, index them every run.

use super::index::{render_index_csv, IndexRow};
use super::paths::{image_filename, partial_path, safe_item_id};
use crate::algebras::ImageSource;
use crate::dataset::write_text;
use crate::error::AppError;
use crate::model::Row;
use std::fs;
use std::io;
use std::path::Path;

/// Options for one materialization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeOptions {
    /// Only the first `max_rows` rows are processed. All rows are kept.
    pub max_rows: Option<usize>,
}

/// Counters for one materialization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub rows_processed: usize,
    pub images_referenced: usize,
    pub downloaded: usize,
    pub reused: usize,
    pub failed: usize,
    pub index_rows: usize,
}

/// How one image ended up on disk, if it did.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ImageResolution {
    Reused,
    Downloaded,
    Failed(String),
}

/// Writes `bytes` beside `target` and renames it into place, so a file at
/// `target` is always complete.
fn store_image(target: &Path, bytes: &[u8]) -> io::Result<()> {
    let part = partial_path(target);
    fs::write(&part, bytes)?;
    if let Err(e) = fs::rename(&part, target) {
        let _ = fs::remove_file(&part);
        return Err(e);
    }
    Ok(())
}

fn resolve_image<I>(images: &I, url: &str, target: &Path) -> ImageResolution
where
    I: ImageSource + ?Sized,
{
    if target.is_file() {
        return ImageResolution::Reused;
    }
    match images.fetch_image(url) {
        Ok(bytes) => match store_image(target, &bytes) {
            Ok(()) => ImageResolution::Downloaded,
            Err(e) => ImageResolution::Failed(format!("write {}: {}", target.display(), e)),
        },
        Err(e) => ImageResolution::Failed(e.to_string()),
    }
}

/// Downloads every image of the first `max_rows` rows into `image_dir`,
/// records `image_paths` on those rows and rewrites the index at
/// `index_path` from scratch.
///
/// Existing files are reused, never re-fetched. A failed download leaves the
/// image out of the row's paths and out of the index. Only filesystem errors
/// on the directory or the index stop the stage.
pub fn materialize<I>(
    rows: &mut [Row],
    images: &I,
    image_dir: &Path,
    index_path: &Path,
    options: &MaterializeOptions,
) -> Result<MaterializeReport, AppError>
where
    I: ImageSource + ?Sized,
{
    fs::create_dir_all(image_dir)?;

    let limit = options.max_rows.unwrap_or(rows.len()).min(rows.len());
    if limit < rows.len() {
        log::info!("Limiting image download to the first {} of {} rows", limit, rows.len());
    }

    let mut report = MaterializeReport::default();
    let mut index: Vec<IndexRow> = Vec::new();

    for (i, row) in rows.iter_mut().take(limit).enumerate() {
        let safe_id = safe_item_id(row.tweet_id.as_ref());
        let mut local_paths = Vec::new();

        if !row.image_urls.is_empty() {
            log::info!(
                "[{}/{}] Tweet {}: {} image(s)",
                i + 1,
                limit,
                safe_id,
                row.image_urls.len()
            );
        }

        for (j, url) in row.image_urls.iter().enumerate() {
            report.images_referenced += 1;
            if url.trim().is_empty() {
                continue;
            }

            let target = image_dir.join(image_filename(&safe_id, j, url));
            match resolve_image(images, url, &target) {
                ImageResolution::Reused => report.reused += 1,
                ImageResolution::Downloaded => report.downloaded += 1,
                ImageResolution::Failed(reason) => {
                    report.failed += 1;
                    log::warn!(
                        "  - Failed to download image {} for tweet {}: {}",
                        j,
                        safe_id,
                        reason
                    );
                    continue;
                }
            }

            let path = target.to_string_lossy().into_owned();
            index.push(IndexRow {
                item_id: safe_id.clone(),
                image_index: j,
                image_path: path.clone(),
                label: row.label.map(|l| l.as_str().to_string()).unwrap_or_default(),
                text: row.text_or_empty().to_string(),
                extracted_text: row.extracted_text_or_empty().to_string(),
            });
            local_paths.push(path);
        }

        row.image_paths = Some(local_paths);
        report.rows_processed += 1;
    }

    write_text(index_path, &render_index_csv(&index)?)?;
    report.index_rows = index.len();

    log::info!(
        "Images referenced: {}, downloaded: {}, reused: {}, failed: {}",
        report.images_referenced,
        report.downloaded,
        report.reused,
        report.failed
    );
    log::info!(
        "Saved image index with {} row(s) to {}",
        report.index_rows,
        index_path.display()
    );
    Ok(report)
}
