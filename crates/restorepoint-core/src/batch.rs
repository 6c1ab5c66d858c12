//! Batch orchestration over many input sources.
//!
//! The core never reads files itself: callers hand it [`DatasetSource`]
//! implementations (the CLI wraps CSV paths in one). `run_batch` processes
//! the sources in caller order and isolates every per-source failure —
//! a stale or malformed export is reported and skipped, never fatal to the
//! batch. Progress and skip events go through the [`BatchReporter`] port;
//! the core owns no log destinations or formatting.

use crate::dataset::Dataset;
use crate::error::{PipelineError, Severity};
use crate::pipeline::{self, PipelineOptions};

/// A readable input that can produce a [`Dataset`].
///
/// `read` must report a missing resource as [`PipelineError::NotFound`]
/// and any other read failure as [`PipelineError::Unexpected`], since the
/// reporter's severity mapping depends on the distinction.
pub trait DatasetSource {
    /// Stable identifier used for provenance labels and reporting.
    fn label(&self) -> &str;

    /// Read the source into a dataset.
    fn read(&self) -> Result<Dataset, PipelineError>;
}

/// Receiver for semantic batch events.
///
/// Implementations own rendering and destination; the core only states
/// what happened. [`LogReporter`] is the default, routing through the
/// `log` facade.
pub trait BatchReporter {
    /// A source is about to be read and processed.
    fn source_started(&mut self, label: &str);

    /// A source was reduced successfully to `rows` rows.
    fn source_finished(&mut self, label: &str, rows: usize);

    /// A source was skipped; the batch continues.
    fn source_skipped(&mut self, label: &str, error: &PipelineError);
}

/// [`BatchReporter`] rendering events through the `log` facade.
///
/// Expected failure kinds log at `warn`, unexpected ones at `error`,
/// mirroring how an operator triages an unattended sweep.
#[derive(Debug, Default)]
pub struct LogReporter;

impl BatchReporter for LogReporter {
    fn source_started(&mut self, label: &str) {
        log::info!("processing input: {label}");
    }

    fn source_finished(&mut self, label: &str, rows: usize) {
        log::info!("reduced {label}: {rows} restore points kept");
    }

    fn source_skipped(&mut self, label: &str, error: &PipelineError) {
        match error.severity() {
            Severity::Expected => log::warn!("skipping {label}: {error}"),
            Severity::Unexpected => log::error!("skipping {label}: {error}"),
        }
    }
}

/// The result of processing one source, keyed by its label.
#[derive(Debug)]
pub struct SourceOutcome {
    /// The source's provenance label.
    pub label: String,
    /// Reduced dataset, or the failure that made the source unusable.
    pub result: Result<Dataset, PipelineError>,
}

impl SourceOutcome {
    /// The dataset, if this source was processed successfully.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.result.as_ref().ok()
    }
}

/// Read and process every source, in order, isolating failures.
///
/// Outcomes are returned in input order (merge order is observable in the
/// output, so callers must not reorder them). Failed sources are reported
/// through `reporter` exactly once, here.
pub fn run_batch<S: DatasetSource>(
    sources: &[S],
    options: &PipelineOptions,
    reporter: &mut dyn BatchReporter,
) -> Vec<SourceOutcome> {
    sources
        .iter()
        .map(|source| {
            let label = source.label().to_string();
            reporter.source_started(&label);

            let result = source
                .read()
                .and_then(|dataset| pipeline::process(&dataset, options));

            match &result {
                Ok(dataset) => reporter.source_finished(&label, dataset.len()),
                Err(error) => reporter.source_skipped(&label, error),
            }

            SourceOutcome { label, result }
        })
        .collect()
}
