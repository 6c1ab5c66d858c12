//! Error types and SNAFU context selectors for the reduction pipeline.
//!
//! This module centralizes the `PipelineError` enum used across the crate
//! and exposes context selectors (via `#[snafu(visibility(pub))]`) so both
//! sibling modules and external collaborators (for example a CSV reader
//! mapping `io::ErrorKind::NotFound`) can attach error context. Keep new
//! variants here so user-facing messages stay consistent.

use snafu::prelude::*;

use crate::timestamp::ParseTimestampError;

/// Errors that can fail the processing of a single input dataset.
///
/// Every variant is recoverable at file granularity: the batch layer logs
/// the failure and continues with the next input. `severity` distinguishes
/// expected operational failures from genuinely unexpected ones so the
/// reporter can pick an appropriate log level.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PipelineError {
    /// The named input resource does not exist.
    #[snafu(display("input not found: {source_id}"))]
    NotFound {
        /// Identifier of the missing input (typically a file path).
        source_id: String,
        /// Underlying I/O error (kind `NotFound`).
        source: std::io::Error,
    },

    /// A value in the timestamp column could not be parsed.
    #[snafu(display("cannot parse timestamp '{value}' in column {column}: {source}"))]
    MalformedTimestamp {
        /// Name of the timestamp column being normalized.
        column: String,
        /// The offending cell value.
        value: String,
        /// Underlying parse error.
        source: ParseTimestampError,
    },

    /// A column required by reduction, projection or merging is absent.
    #[snafu(display("missing column {column}"))]
    MissingColumn {
        /// Name of the absent column.
        column: String,
    },

    /// Any other failure while processing one input (for example
    /// unreadable or structurally corrupt content).
    #[snafu(display("unexpected failure: {message}"))]
    Unexpected {
        /// Human-readable description of the failure.
        message: String,
    },
}

/// How surprising a per-input failure is, used to pick a log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Expected operational failure (stale path, malformed export).
    Expected,
    /// Failure outside the anticipated taxonomy; logged louder.
    Unexpected,
}

impl PipelineError {
    /// Classify this error for reporting purposes.
    ///
    /// `NotFound`, `MalformedTimestamp` and `MissingColumn` are routine
    /// when sweeping a directory of aging exports; anything else is not.
    pub fn severity(&self) -> Severity {
        match self {
            PipelineError::Unexpected { .. } => Severity::Unexpected,
            _ => Severity::Expected,
        }
    }
}
