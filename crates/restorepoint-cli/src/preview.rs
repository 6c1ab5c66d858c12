//! Console preview rendering for reduced datasets.

use restorepoint_core::Dataset;
use tabled::{builder::Builder, settings::Style};

/// How many rows a preview shows before truncating.
const PREVIEW_ROWS: usize = 10;

/// Render the first rows of `dataset` as a bordered table.
///
/// Returns `None` for a dataset with no columns (nothing to draw).
pub fn render_preview(dataset: &Dataset) -> Option<String> {
    if dataset.columns().is_empty() {
        return None;
    }

    let mut builder = Builder::default();
    builder.push_record(dataset.columns());

    for row in dataset.rows().iter().take(PREVIEW_ROWS) {
        builder.push_record(row.iter().map(|cell| cell.render()));
    }

    let mut table = builder.build();
    table.with(Style::rounded());

    let mut rendered = table.to_string();
    if dataset.len() > PREVIEW_ROWS {
        rendered.push_str(&format!("\n({} more rows)", dataset.len() - PREVIEW_ROWS));
    }

    Some(rendered)
}
