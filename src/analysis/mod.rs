//! Plan analysis pipeline.
//!
//! This module provides:
//! - Contour-based region detection
//! - The detected point model
//! - The full upload → points → script pipeline
//! - JSON export of detected points

pub mod export;
pub mod point;
pub mod regions;

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::AppConfig;
use crate::ocr::{extract_coordinates, SkippedLine, TextRecognizer};
use crate::script::render_dynamo_script;
use crate::upload::UploadedFile;

/// Result of one analysis run.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Region centroids followed by text coordinates, in detection order
    pub points: Vec<point::DetectedPoint>,
    /// OCR lines with a parenthesized group that did not parse
    pub skipped_lines: Vec<SkippedLine>,
    /// Rendered Dynamo script for `points`
    pub script: String,
}

/// Runs region detection and OCR over an uploaded plan.
///
/// The upload is staged in a temporary file for the OCR process; the file is
/// removed when this function returns, whether it succeeds or fails.
pub fn analyze_plan(
    file: &UploadedFile,
    config: &AppConfig,
    recognizer: &dyn TextRecognizer,
) -> Result<Analysis> {
    analyze_plan_in(file, config, recognizer, &std::env::temp_dir())
}

/// [`analyze_plan`] with the staged copy created inside `staging_dir`.
pub fn analyze_plan_in(
    file: &UploadedFile,
    config: &AppConfig,
    recognizer: &dyn TextRecognizer,
    staging_dir: &Path,
) -> Result<Analysis> {
    crate::log(&format!("Analyzing plan: {} ({} bytes)", file.name, file.bytes.len()));

    let staged = file
        .stage_in(staging_dir)
        .context("Failed to stage uploaded plan")?;
    let raster = file
        .decode()
        .with_context(|| format!("Failed to read plan {}", file.name))?;

    let mut points = regions::detect_regions(&raster, &config.detection);

    let text = recognizer
        .recognize(staged.path())
        .context("Text recognition failed")?;
    let extraction = extract_coordinates(&text);
    if !extraction.skipped.is_empty() {
        crate::log(&format!(
            "{} OCR lines had unparseable coordinates",
            extraction.skipped.len()
        ));
    }
    points.extend(extraction.points);

    let script = render_dynamo_script(&points);
    crate::log(&format!("Analysis complete: {} points", points.len()));

    Ok(Analysis {
        points,
        skipped_lines: extraction.skipped,
        script,
    })
}
