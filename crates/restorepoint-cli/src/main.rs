//! CLI tool for reducing restore-point CSV exports.
//!
//! `rpfilter reduce` keeps each workload's most recent restore point per
//! input file; `rpfilter merge` additionally combines the reduced tables
//! into one CSV tagged with a source column. Per-input failures (missing
//! file, malformed timestamps, missing columns) are logged and skipped so
//! the tool can sweep a directory of aging exports unattended.

mod csv_io;
mod error;
mod preview;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use restorepoint_core::batch::{run_batch, BatchReporter, LogReporter};
use restorepoint_core::merge::merge_sources;
use restorepoint_core::timestamp::{day_end, day_start};
use restorepoint_core::{DateWindow, Dataset, PipelineOptions};
use snafu::ResultExt;
use tracing_subscriber::EnvFilter;

use crate::csv_io::{write_dataset, CsvFile};
use crate::error::{CliResult, CreateOutputDirSnafu, IncompleteWindowSnafu, InvalidDateSnafu};

/// Options shared by every subcommand that runs the per-file pipeline.
#[derive(Debug, Args)]
struct PipelineArgs {
    /// Column holding the creation timestamp
    #[arg(long = "time-column", default_value = "CreationTime")]
    time_column: String,

    /// Column identifying the workload / VM
    #[arg(long = "key-column", default_value = "VmName")]
    key_column: String,

    /// Inclusive window start, YYYY-MM-DD (requires --date-end)
    #[arg(long = "date-start")]
    date_start: Option<String>,

    /// Inclusive window end, YYYY-MM-DD; covers the whole end day
    #[arg(long = "date-end")]
    date_end: Option<String>,
}

impl PipelineArgs {
    fn to_options(&self) -> CliResult<PipelineOptions> {
        let window = match (&self.date_start, &self.date_end) {
            (Some(start), Some(end)) => Some(DateWindow {
                start: day_start(parse_date(start)?),
                end: day_end(parse_date(end)?),
            }),
            (None, None) => None,
            _ => return IncompleteWindowSnafu.fail(),
        };

        Ok(PipelineOptions {
            timestamp_column: self.time_column.clone(),
            key_column: self.key_column.clone(),
            window,
            projection: None,
        })
    }
}

fn parse_date(raw: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").context(InvalidDateSnafu { raw })
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reduce each input CSV to its latest restore point per workload
    Reduce {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Also write the minimal-column output (key + timestamp)
        #[arg(long, default_value_t = false)]
        minimal: bool,

        /// Suppress the full-column output
        #[arg(long = "skip-full", default_value_t = false)]
        skip_full: bool,

        /// Directory for outputs (default: alongside each input)
        #[arg(long = "output-dir")]
        output_dir: Option<PathBuf>,

        /// Print a table preview of each written output
        #[arg(long, default_value_t = false)]
        preview: bool,

        /// Input CSV files, processed in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Reduce all inputs and merge them into one source-tagged CSV
    Merge {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Path of the merged output CSV
        #[arg(long)]
        output: PathBuf,

        /// Name of the added provenance column
        #[arg(long = "source-column", default_value = "SourceFile")]
        source_column: String,

        /// Print a table preview of the merged output
        #[arg(long, default_value_t = false)]
        preview: bool,

        /// Input CSV files, merged in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

#[derive(Debug, Parser)]
#[command(name = "rpfilter", about = "Reduce restore point exports to the latest per workload")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

/// Output path for one input: `<stem>-filtered-<kind>.csv`.
fn output_path(input: &Path, output_dir: Option<&Path>, kind: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "input".to_string());

    let name = format!("{stem}-filtered-{kind}.csv");
    match output_dir {
        Some(dir) => dir.join(name),
        None => input.parent().unwrap_or(Path::new(".")).join(name),
    }
}

fn write_output(dataset: &Dataset, path: &Path, preview: bool) -> CliResult<()> {
    write_dataset(dataset, path)?;
    println!("Wrote {} ({} rows)", path.display(), dataset.len());

    if preview {
        if let Some(rendered) = preview::render_preview(dataset) {
            println!("{rendered}");
        }
    }
    Ok(())
}

fn cmd_reduce(
    pipeline: PipelineArgs,
    minimal: bool,
    skip_full: bool,
    output_dir: Option<PathBuf>,
    preview: bool,
    inputs: Vec<PathBuf>,
) -> CliResult<()> {
    let options = pipeline.to_options()?;

    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir).context(CreateOutputDirSnafu {
            path: dir.display().to_string(),
        })?;
    }

    tracing::info!("reducing {} input file(s)", inputs.len());

    let sources: Vec<CsvFile> = inputs.iter().map(CsvFile::new).collect();
    let mut reporter = LogReporter;
    let outcomes = run_batch(&sources, &options, &mut reporter);

    let minimal_columns = vec![options.key_column.clone(), options.timestamp_column.clone()];

    for (source, outcome) in sources.iter().zip(&outcomes) {
        let Some(dataset) = outcome.dataset() else {
            continue;
        };

        if !skip_full {
            let path = output_path(source.path(), output_dir.as_deref(), "full");
            write_output(dataset, &path, preview)?;
        }

        if minimal {
            match dataset.select(&minimal_columns) {
                Ok(narrow) => {
                    let path = output_path(source.path(), output_dir.as_deref(), "minimal");
                    write_output(&narrow, &path, preview)?;
                }
                // Reachable only if reduction ran against renamed columns;
                // same containment as any other per-input failure.
                Err(err) => reporter.source_skipped(&outcome.label, &err),
            }
        }
    }

    Ok(())
}

fn cmd_merge(
    pipeline: PipelineArgs,
    output: PathBuf,
    source_column: String,
    preview: bool,
    inputs: Vec<PathBuf>,
) -> CliResult<()> {
    let options = pipeline.to_options()?;

    tracing::info!("merging {} input file(s)", inputs.len());

    let sources: Vec<CsvFile> = inputs.iter().map(CsvFile::new).collect();
    let mut reporter = LogReporter;
    let outcomes = run_batch(&sources, &options, &mut reporter);
    let merged = merge_sources(&outcomes, &source_column, &mut reporter);

    let usable = outcomes.iter().filter(|o| o.result.is_ok()).count();

    write_dataset(&merged, &output)?;
    println!(
        "Merged {usable} of {} source(s) into {} ({} rows)",
        outcomes.len(),
        output.display(),
        merged.len()
    );

    if preview {
        if let Some(rendered) = preview::render_preview(&merged) {
            println!("{rendered}");
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Reduce {
            pipeline,
            minimal,
            skip_full,
            output_dir,
            preview,
            inputs,
        } => cmd_reduce(pipeline, minimal, skip_full, output_dir, preview, inputs),

        Command::Merge {
            pipeline,
            output,
            source_column,
            preview,
            inputs,
        } => cmd_merge(pipeline, output, source_column, preview, inputs),
    }
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
