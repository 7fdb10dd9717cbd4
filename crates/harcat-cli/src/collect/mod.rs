//! Extraction command handlers for the CLI.
//!
//! `run_extract` is called from `main` once the configuration is resolved.
//! Per-unit failures are logged and skipped rather than propagated so a
//! single bad capture entry does not abort the full run; only an unreadable
//! top-level input or a failed export is fatal.

mod runner;
mod source;
mod summary;

use harcat_core::{AppConfig, ProductRecord, SourceKind};
use harcat_scraper::ImageResolver;

use crate::export::export_records;

use runner::Collector;
use summary::{RunSummary, SkipReason};

pub(crate) use source::file_label;

/// Reads every input unit named by `config` and returns the accumulated
/// records in encounter order together with the run summary.
///
/// # Errors
///
/// Returns an error if the image client cannot be built or the top-level
/// input (HAR directory or JSON document) cannot be read.
pub(crate) async fn collect_records(
    config: &AppConfig,
) -> anyhow::Result<(Vec<ProductRecord>, RunSummary)> {
    let images = ImageResolver::new(
        &config.image_output_dir,
        &config.user_agent,
        config.image_timeout_secs,
    )?;
    let mut collector = Collector::new(&images);

    match config.source_kind {
        SourceKind::HarDirectory => {
            let files = source::list_har_files(&config.input_path)?;
            if files.is_empty() {
                tracing::warn!(dir = %config.input_path.display(), "no .har files found");
            }
            for path in &files {
                tracing::info!(file = %path.display(), "processing archive");
                collector.collect_archive(path).await;
            }
        }
        SourceKind::JsonDocument => {
            let elements = source::load_json_document(&config.input_path)?;
            let label = source::file_label(&config.input_path);
            tracing::info!(file = %label, elements = elements.len(), "processing JSON document");
            collector.collect_document(&label, &elements).await;
        }
    }

    Ok(collector.finish())
}

/// Runs a full extraction: collect, export, and print the run summary.
///
/// # Errors
///
/// Returns an error on fatal input failures (see [`collect_records`]) or if
/// the spreadsheet cannot be written.
pub(crate) async fn run_extract(config: &AppConfig) -> anyhow::Result<RunSummary> {
    let (records, summary) = collect_records(config).await?;

    export_records(&config.export_path, &records)?;

    let unrecognized = summary.skipped_where(|r| *r == SkipReason::UnrecognizedShape);
    if unrecognized > 0 {
        tracing::info!(unrecognized, "responses did not match a known catalog shape");
    }

    for skipped in summary.skipped.iter().filter(|s| !s.reason.is_routine()) {
        println!("skipped {} {}: {}", skipped.source, skipped.unit, skipped.reason);
    }
    println!("{summary}");
    println!("product data saved to {}", config.export_path.display());
    println!("images saved to {}", config.image_output_dir.display());
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
