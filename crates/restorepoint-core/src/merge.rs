//! Provenance-tagged merging of per-source outcomes.

use crate::batch::{BatchReporter, SourceOutcome};
use crate::dataset::{Dataset, Value};
use crate::error::MissingColumnSnafu;

/// Concatenate the usable outcomes into one dataset tagged by source.
///
/// Sources are appended in the given order and each source's rows keep
/// their relative order; the result is deliberately *not* re-sorted by
/// key, since source grouping is part of the output contract. The first
/// usable dataset fixes the output column set; every merged row gains a
/// trailing `source_column` cell holding its source's label.
///
/// Failed outcomes were already reported at batch time and are skipped
/// silently. A later dataset missing one of the fixed columns is skipped
/// with a reported `MissingColumn` event (file-granular containment, same
/// as every other per-source failure). Zero usable sources yield an empty
/// dataset with no columns — a legitimate outcome, not an error.
pub fn merge_sources(
    outcomes: &[SourceOutcome],
    source_column: &str,
    reporter: &mut dyn BatchReporter,
) -> Dataset {
    let mut merged: Option<Dataset> = None;

    for outcome in outcomes {
        let Some(dataset) = outcome.dataset() else {
            continue;
        };

        let target = merged.get_or_insert_with(|| {
            let mut columns = dataset.columns().to_vec();
            columns.push(source_column.to_string());
            Dataset::new(columns)
        });

        // All but the trailing provenance column.
        let base_columns = &target.columns()[..target.columns().len() - 1];
        let indices: Option<Vec<usize>> = base_columns
            .iter()
            .map(|name| {
                let idx = dataset.column_index(name);
                if idx.is_none() {
                    let error = MissingColumnSnafu { column: name }.build();
                    reporter.source_skipped(&outcome.label, &error);
                }
                idx
            })
            .collect();

        let Some(indices) = indices else {
            continue;
        };

        for row in dataset.rows() {
            let mut tagged: Vec<Value> = indices.iter().map(|&i| row[i].clone()).collect();
            tagged.push(Value::Text(outcome.label.clone()));
            target.push_row(tagged);
        }
    }

    merged.unwrap_or_else(|| Dataset::new(Vec::new()))
}
