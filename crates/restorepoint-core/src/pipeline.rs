//! Per-dataset pipeline orchestration.
//!
//! One entry point, [`process`], runs the stages in their fixed order:
//! reduce, then the optional date window (followed by a re-sort to the
//! canonical key-ascending order), then the optional projection. Each
//! stage is pure; a failure anywhere yields the error for this dataset
//! only and the batch layer carries on with the next input.

use chrono::{DateTime, Utc};

use crate::dataset::{Dataset, SortOrder};
use crate::error::PipelineError;
use crate::reduce::latest_restore_points;
use crate::window::within_window;

/// Default workload identifier column in `Get-VBRRestorepoint` exports.
pub const DEFAULT_KEY_COLUMN: &str = "VmName";

/// Default creation timestamp column in `Get-VBRRestorepoint` exports.
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "CreationTime";

/// An inclusive `[start, end]` creation-time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Inclusive lower bound.
    pub start: DateTime<Utc>,
    /// Inclusive upper bound.
    pub end: DateTime<Utc>,
}

/// Configuration for one per-dataset pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Column holding the creation timestamp.
    pub timestamp_column: String,
    /// Column identifying the workload (grouping key).
    pub key_column: String,
    /// Optional inclusive date window applied after reduction.
    pub window: Option<DateWindow>,
    /// Optional column projection applied last.
    pub projection: Option<Vec<String>>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            window: None,
            projection: None,
        }
    }
}

/// Run the full per-dataset pipeline.
///
/// The re-sort after the window filter is usually a no-op (reduction
/// already orders by key) but is performed unconditionally so the
/// key-ascending invariant holds regardless of which stages ran.
pub fn process(dataset: &Dataset, options: &PipelineOptions) -> Result<Dataset, PipelineError> {
    let mut output =
        latest_restore_points(dataset, &options.timestamp_column, &options.key_column)?;

    if let Some(window) = &options.window {
        output = within_window(&output, &options.timestamp_column, window.start, window.end)?;
        let key_idx = output.require_column(&options.key_column)?;
        output.sort_by_column(key_idx, SortOrder::Ascending);
    }

    if let Some(columns) = &options.projection {
        output = output.select(columns)?;
    }

    Ok(output)
}
