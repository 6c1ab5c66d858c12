//! Row-oriented tabular primitive the reduction pipeline operates on.
//!
//! A [`Dataset`] is an ordered column list plus ordered rows of positional
//! cells. There is no global schema enforcement: all rows are assumed to
//! share the column list, and only the columns a transformation touches
//! are ever interpreted. Sorts are **stable**, which the reduction stage
//! relies on for its tie-breaking contract.

use chrono::{DateTime, Utc};

use crate::error::{MissingColumnSnafu, PipelineError};
use crate::timestamp::format_timestamp;

/// A single cell value.
///
/// CSV input is untyped, so every cell starts out as [`Value::Text`]; the
/// reduction stage normalizes the configured timestamp column to
/// [`Value::Timestamp`]. The derived ordering is the "default ordering of
/// the identifier's type" the presentation-order invariant asks for: text
/// cells compare lexicographically, timestamp cells chronologically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    /// An uninterpreted text cell.
    Text(String),
    /// A parsed creation timestamp.
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Render the cell for tabular output.
    pub fn render(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Timestamp(ts) => format_timestamp(*ts),
        }
    }
}

/// One row of cells, positionally aligned with the dataset's columns.
pub type Row = Vec<Value>;

/// Sort direction for [`Dataset::sort_by_column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

/// An ordered collection of rows sharing one column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create an empty dataset with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a dataset from pre-built rows.
    ///
    /// Rows are assumed to match the column list in length; this is not
    /// enforced beyond a debug assertion, matching the no-schema model.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        debug_assert!(
            rows.iter().all(|r| r.len() == columns.len()),
            "row width must match column count"
        );
        Self { columns, rows }
    }

    /// Column names, in presentation order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, in presentation order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row. Width is the caller's responsibility (debug-checked).
    pub fn push_row(&mut self, row: Row) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Position of `name` in the column list, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Position of `name`, or a `MissingColumn` error.
    pub fn require_column(&self, name: &str) -> Result<usize, PipelineError> {
        self.column_index(name)
            .ok_or_else(|| MissingColumnSnafu { column: name }.build())
    }

    /// Stable sort of the rows by the cell at `index`.
    pub fn sort_by_column(&mut self, index: usize, order: SortOrder) {
        self.rows.sort_by(|a, b| {
            let ordering = a[index].cmp(&b[index]);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }

    /// Project onto `columns`, in the given order, preserving row order.
    ///
    /// Fails with `MissingColumn` when a requested column is absent.
    pub fn select(&self, columns: &[String]) -> Result<Dataset, PipelineError> {
        let indices = columns
            .iter()
            .map(|name| self.require_column(name))
            .collect::<Result<Vec<_>, _>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Dataset::from_rows(columns.to_vec(), rows))
    }
}
