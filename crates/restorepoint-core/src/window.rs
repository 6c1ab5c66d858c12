//! Inclusive date-window filtering.

use chrono::{DateTime, Utc};
use snafu::ResultExt;

use crate::dataset::{Dataset, Value};
use crate::error::{MalformedTimestampSnafu, PipelineError};
use crate::timestamp::parse_timestamp;

/// Keep only rows whose timestamp lies within `[start, end]`.
///
/// Both bounds are inclusive. An inverted window (`start > end`) has no
/// valid members and yields an empty dataset with the input's columns,
/// not an error. Row order is preserved; callers wanting the canonical
/// key-ascending order re-sort afterwards (the pipeline always does).
///
/// Timestamp cells may be pre-normalized [`Value::Timestamp`]s (the usual
/// case, post-reduction) or parseable text, so the filter also works on
/// datasets that skipped reduction.
pub fn within_window(
    dataset: &Dataset,
    timestamp_column: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Dataset, PipelineError> {
    let ts_idx = dataset.require_column(timestamp_column)?;

    let mut kept = Dataset::new(dataset.columns().to_vec());
    if start > end {
        return Ok(kept);
    }

    for row in dataset.rows() {
        let ts = cell_instant(&row[ts_idx], timestamp_column)?;
        if start <= ts && ts <= end {
            kept.push_row(row.clone());
        }
    }

    Ok(kept)
}

fn cell_instant(cell: &Value, column: &str) -> Result<DateTime<Utc>, PipelineError> {
    match cell {
        Value::Timestamp(ts) => Ok(*ts),
        Value::Text(raw) => parse_timestamp(raw).context(MalformedTimestampSnafu {
            column,
            value: raw.clone(),
        }),
    }
}
