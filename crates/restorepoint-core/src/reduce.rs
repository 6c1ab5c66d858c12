//! Keep-latest-per-workload reduction.
//!
//! This is the heart of the pipeline: collapse a restore-point history to
//! one row per workload, keeping the row with the maximum creation time.
//! The tie-breaking policy is an observable contract, not a sort-library
//! accident: rows are stable-sorted descending by timestamp and duplicate
//! keys are dropped keeping the first occurrence, so among rows tied on
//! the maximum timestamp the earliest row in the original input wins.

use std::collections::HashSet;

use snafu::ResultExt;

use crate::dataset::{Dataset, SortOrder, Value};
use crate::error::{MalformedTimestampSnafu, PipelineError};
use crate::timestamp::parse_timestamp;

/// Reduce `dataset` to the most recent restore point per workload.
///
/// `timestamp_column` is normalized to [`Value::Timestamp`] in the result;
/// a cell that cannot be parsed fails the whole call with
/// `MalformedTimestamp` (per-input failure, isolated by the batch layer).
/// The result holds at most one row per distinct `key_column` value and is
/// ordered ascending by key. The input is left untouched.
pub fn latest_restore_points(
    dataset: &Dataset,
    timestamp_column: &str,
    key_column: &str,
) -> Result<Dataset, PipelineError> {
    let ts_idx = dataset.require_column(timestamp_column)?;
    let key_idx = dataset.require_column(key_column)?;

    let mut rows = dataset.rows().to_vec();
    for row in &mut rows {
        row[ts_idx] = normalize_timestamp(&row[ts_idx], timestamp_column)?;
    }

    // Stable descending sort, then keep the first row seen per key. This
    // reproduces the "keep first after descending sort" policy exactly.
    rows.sort_by(|a, b| b[ts_idx].cmp(&a[ts_idx]));

    let mut seen: HashSet<Value> = HashSet::with_capacity(rows.len());
    rows.retain(|row| seen.insert(row[key_idx].clone()));

    let mut reduced = Dataset::from_rows(dataset.columns().to_vec(), rows);
    reduced.sort_by_column(key_idx, SortOrder::Ascending);
    Ok(reduced)
}

fn normalize_timestamp(cell: &Value, column: &str) -> Result<Value, PipelineError> {
    match cell {
        Value::Timestamp(ts) => Ok(Value::Timestamp(*ts)),
        Value::Text(raw) => {
            let ts = parse_timestamp(raw).context(MalformedTimestampSnafu {
                column,
                value: raw.clone(),
            })?;
            Ok(Value::Timestamp(ts))
        }
    }
}
