//! Sequential batch driver: input units → shapes → records.
//!
//! Units and image downloads are awaited one at a time. A unit that cannot
//! be read or parsed is recorded in the [`RunSummary`] and skipped; it never
//! aborts the batch.

use std::path::Path;

use harcat_core::{sentinel, ProductRecord};
use harcat_scraper::{
    classify, classify_document, json_responses, normalize_product, parse_archive,
    unwrap_envelope, ImageResolver, ResponseShape,
};
use serde_json::Value;

use super::source::file_label;
use super::summary::{RunSummary, SkipReason, UnitOutcome};

/// Shape classifier applied to each unit of an input kind.
type Classifier = for<'v> fn(&'v Value) -> ResponseShape<'v>;

/// Accumulates records and outcomes across every input unit of a run.
pub(crate) struct Collector<'a> {
    images: &'a ImageResolver,
    records: Vec<ProductRecord>,
    summary: RunSummary,
}

impl<'a> Collector<'a> {
    pub(crate) fn new(images: &'a ImageResolver) -> Self {
        Self {
            images,
            records: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    /// Processes every JSON-typed response of one HAR archive.
    pub(crate) async fn collect_archive(&mut self, path: &Path) {
        let source = file_label(path);
        self.summary.input_files += 1;

        let archive = match tokio::fs::read_to_string(path).await {
            Ok(text) => parse_archive(&text, &source).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        let archive = match archive {
            Ok(archive) => archive,
            Err(reason) => {
                tracing::error!(file = %source, error = %reason, "error reading archive");
                self.summary.record(
                    &source,
                    "archive".to_string(),
                    UnitOutcome::Skipped(SkipReason::UnreadableArchive(reason)),
                );
                return;
            }
        };

        for unit in json_responses(&archive) {
            let label = format!("entry {}", unit.index);
            let outcome = match unit.body {
                Ok(response) => self.collect_response(&response, &source, classify).await,
                Err(err) => UnitOutcome::Skipped(err.into()),
            };
            self.summary.record(&source, label, outcome);
        }
    }

    /// Processes each element of a loaded JSON document as one unit.
    ///
    /// Unlike captured replies, elements may also be flat catalogs.
    pub(crate) async fn collect_document(&mut self, source: &str, elements: &[Value]) {
        self.summary.input_files += 1;
        for (index, element) in elements.iter().enumerate() {
            let outcome = self
                .collect_response(element, source, classify_document)
                .await;
            self.summary.record(source, format!("element {index}"), outcome);
        }
    }

    /// Classifies one catalog response and normalizes all of its products.
    pub(crate) async fn collect_response(
        &mut self,
        response: &Value,
        source: &str,
        classify_unit: Classifier,
    ) -> UnitOutcome {
        let shape = classify_unit(unwrap_envelope(response));
        let Some(category) = shape.label() else {
            return UnitOutcome::Skipped(SkipReason::UnrecognizedShape);
        };

        let products = shape.products();
        tracing::debug!(
            file = source,
            shape = shape.kind(),
            category,
            products = products.len(),
            "resolved catalog response"
        );

        for product in products {
            let record = normalize_product(product, category, source, self.images).await;
            if record.has_saved_image() {
                self.summary.images_saved += 1;
            } else if record.image_path == sentinel::IMAGE_DOWNLOAD_FAILED {
                self.summary.image_failures += 1;
            }
            self.records.push(record);
        }
        UnitOutcome::Extracted {
            products: products.len(),
        }
    }

    pub(crate) fn finish(self) -> (Vec<ProductRecord>, RunSummary) {
        (self.records, self.summary)
    }
}
