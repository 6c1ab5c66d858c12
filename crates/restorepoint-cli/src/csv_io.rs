//! CSV collaborators around the core pipeline.
//!
//! Reading maps filesystem and parse failures onto the core's error
//! taxonomy: a missing file becomes `NotFound` (expected, batch keeps
//! going), anything else while opening or decoding becomes `Unexpected`.
//! Writing goes through [`CliError`] since output failures are not part of
//! the per-input containment contract.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use restorepoint_core::batch::DatasetSource;
use restorepoint_core::error::{NotFoundSnafu, PipelineError, UnexpectedSnafu};
use restorepoint_core::{Dataset, Value};
use snafu::{IntoError, ResultExt};

use crate::error::{CliResult, CreateOutputSnafu, WriteCsvSnafu};

/// A CSV file on disk acting as a batch input.
pub struct CsvFile {
    path: PathBuf,
    label: String,
}

impl CsvFile {
    /// Wrap `path`; the provenance label is the file name when available.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self { path, label }
    }

    /// The wrapped path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for CsvFile {
    fn label(&self) -> &str {
        &self.label
    }

    fn read(&self) -> Result<Dataset, PipelineError> {
        read_dataset(&self.path)
    }
}

/// Read a headered CSV file into a [`Dataset`] of text cells.
pub fn read_dataset(path: &Path) -> Result<Dataset, PipelineError> {
    let display = path.display().to_string();

    let file = File::open(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            NotFoundSnafu {
                source_id: display.clone(),
            }
            .into_error(err)
        } else {
            UnexpectedSnafu {
                message: format!("cannot open {display}: {err}"),
            }
            .build()
        }
    })?;

    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let columns: Vec<String> = reader
        .headers()
        .map_err(|err| {
            UnexpectedSnafu {
                message: format!("cannot read csv header of {display}: {err}"),
            }
            .build()
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut dataset = Dataset::new(columns);
    for record in reader.records() {
        let record = record.map_err(|err| {
            UnexpectedSnafu {
                message: format!("malformed csv record in {display}: {err}"),
            }
            .build()
        })?;
        dataset.push_row(record.iter().map(|cell| Value::Text(cell.to_string())).collect());
    }

    Ok(dataset)
}

/// Write a [`Dataset`] as a headered CSV file at `path`.
pub fn write_dataset(dataset: &Dataset, path: &Path) -> CliResult<()> {
    let display = path.display().to_string();

    let file = File::create(path).context(CreateOutputSnafu {
        path: display.clone(),
    })?;

    // A merge where every source failed has no columns at all; an empty
    // file is the faithful rendering of that.
    if dataset.columns().is_empty() {
        return Ok(());
    }

    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(dataset.columns())
        .context(WriteCsvSnafu {
            path: display.clone(),
        })?;

    for row in dataset.rows() {
        writer
            .write_record(row.iter().map(|cell| cell.render()))
            .context(WriteCsvSnafu {
                path: display.clone(),
            })?;
    }

    writer.flush().map_err(|err| {
        CreateOutputSnafu {
            path: display.clone(),
        }
        .into_error(err)
    })?;

    Ok(())
}
