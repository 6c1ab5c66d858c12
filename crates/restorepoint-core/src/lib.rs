//! Core engine for reducing backup restore-point tables.
//!
//! This crate provides the building blocks for turning raw restore-point
//! exports (one row per restore point, keyed by workload) into reduced
//! tables:
//!
//! - A small row-oriented `Dataset` primitive with stable sorts and
//!   projection (`dataset` module).
//! - Keep-latest-per-workload reduction with an explicit, testable
//!   tie-breaking contract (`reduce` module).
//! - Inclusive date-window filtering (`window` module).
//! - Provenance-tagged merging of several reduced tables (`merge` module).
//! - Per-dataset pipeline orchestration (`pipeline` module) and
//!   multi-source batch orchestration with per-source failure isolation
//!   (`batch` module).
//!
//! Reading bytes into a `Dataset` and writing one back out are owned by
//! callers (for example the CLI crate) through the `batch::DatasetSource`
//! port; the core never touches file paths or formats.
#![deny(missing_docs)]
pub mod batch;
pub mod dataset;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod reduce;
pub mod timestamp;
pub mod window;

pub use dataset::{Dataset, Row, Value};
pub use error::{PipelineError, Severity};
pub use pipeline::{DateWindow, PipelineOptions};
pub use timestamp::ParseTimestampError;
