use snafu::Snafu;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CliError {
    #[snafu(display("Invalid date '{raw}' (expected YYYY-MM-DD): {source}"))]
    InvalidDate {
        raw: String,
        source: chrono::ParseError,
    },

    #[snafu(display("--date-start and --date-end must be given together"))]
    IncompleteWindow,

    #[snafu(display("Failed to create output directory: {path}"))]
    CreateOutputDir {
        path: String,
        source: std::io::Error,
    },

    #[snafu(display("Failed to create output file: {path}"))]
    CreateOutput {
        path: String,
        source: std::io::Error,
    },

    #[snafu(display("Failed to write csv output: {path}"))]
    WriteCsv { path: String, source: csv::Error },
}
