//! Per-unit outcomes and the aggregated run summary.

use harcat_scraper::UnitError;

/// Why an input unit contributed no records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SkipReason {
    /// The archive file could not be read or is not a HAR document.
    UnreadableArchive(String),
    /// The HAR entry lacks the request/response structure.
    InvalidEntry(String),
    /// JSON-typed response with no body.
    EmptyBody,
    /// The body could not be decoded or parsed as JSON.
    InvalidJson(String),
    /// Valid JSON that matches none of the known catalog shapes.
    UnrecognizedShape,
}

impl SkipReason {
    /// Skips that are expected in ordinary captures and only worth a
    /// debug-level log line.
    pub(crate) fn is_routine(&self) -> bool {
        matches!(self, SkipReason::EmptyBody | SkipReason::UnrecognizedShape)
    }
}

impl From<UnitError> for SkipReason {
    fn from(err: UnitError) -> Self {
        match err {
            UnitError::InvalidEntry(reason) => SkipReason::InvalidEntry(reason),
            UnitError::EmptyBody => SkipReason::EmptyBody,
            UnitError::InvalidEncoding(reason) | UnitError::InvalidJson(reason) => {
                SkipReason::InvalidJson(reason)
            }
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnreadableArchive(reason) => write!(f, "unreadable archive: {reason}"),
            SkipReason::InvalidEntry(reason) => write!(f, "invalid entry: {reason}"),
            SkipReason::EmptyBody => write!(f, "empty response body"),
            SkipReason::InvalidJson(reason) => write!(f, "invalid JSON: {reason}"),
            SkipReason::UnrecognizedShape => write!(f, "unrecognized response shape"),
        }
    }
}

/// Result of processing one input unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UnitOutcome {
    Extracted { products: usize },
    Skipped(SkipReason),
}

/// A skipped unit with enough context to find it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SkippedUnit {
    /// Archive or JSON file name.
    pub source: String,
    /// `entry N` within an archive, `element N` within a JSON document, or
    /// `archive` for whole-file failures.
    pub unit: String,
    pub reason: SkipReason,
}

/// Totals for one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub input_files: usize,
    pub units: usize,
    pub products: usize,
    pub images_saved: usize,
    pub image_failures: usize,
    pub skipped: Vec<SkippedUnit>,
}

impl RunSummary {
    pub(crate) fn record(&mut self, source: &str, unit: String, outcome: UnitOutcome) {
        self.units += 1;
        match outcome {
            UnitOutcome::Extracted { products } => self.products += products,
            UnitOutcome::Skipped(reason) => {
                if reason.is_routine() {
                    tracing::debug!(file = source, unit = %unit, reason = %reason, "skipping unit");
                } else {
                    tracing::warn!(file = source, unit = %unit, reason = %reason, "skipping unit");
                }
                self.skipped.push(SkippedUnit {
                    source: source.to_owned(),
                    unit,
                    reason,
                });
            }
        }
    }

    /// Counts skipped units matching `predicate`.
    pub(crate) fn skipped_where(&self, predicate: impl Fn(&SkipReason) -> bool) -> usize {
        self.skipped.iter().filter(|s| predicate(&s.reason)).count()
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "extracted {} products from {} input files ({} units, {} skipped, {} images saved, {} image download failures)",
            self.products,
            self.input_files,
            self.units,
            self.skipped.len(),
            self.images_saved,
            self.image_failures
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_products_and_skips() {
        let mut summary = RunSummary::default();
        summary.record("a.har", "entry 0".into(), UnitOutcome::Extracted { products: 3 });
        summary.record(
            "a.har",
            "entry 4".into(),
            UnitOutcome::Skipped(SkipReason::UnrecognizedShape),
        );

        assert_eq!(summary.units, 2);
        assert_eq!(summary.products, 3);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].unit, "entry 4");
        assert_eq!(
            summary.skipped_where(|r| *r == SkipReason::UnrecognizedShape),
            1
        );
    }

    #[test]
    fn unit_error_maps_to_skip_reason() {
        assert_eq!(SkipReason::from(UnitError::EmptyBody), SkipReason::EmptyBody);
        assert_eq!(
            SkipReason::from(UnitError::InvalidEncoding("bad".into())),
            SkipReason::InvalidJson("bad".into())
        );
    }

    #[test]
    fn display_reports_totals() {
        let summary = RunSummary {
            input_files: 2,
            units: 5,
            products: 12,
            images_saved: 10,
            image_failures: 1,
            skipped: Vec::new(),
        };
        assert_eq!(
            summary.to_string(),
            "extracted 12 products from 2 input files (5 units, 0 skipped, 10 images saved, 1 image download failures)"
        );
    }
}
