use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Load errors (fatal at startup)
// ---------------------------------------------------------------------------

/// Anything that prevents a complete, well-formed dataset from being built.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// The file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header row could not be read.
    #[error("failed to read CSV header: {0}")]
    Header(#[source] csv::Error),

    /// A record could not be parsed as CSV.
    #[error("row {row}: malformed record: {source}")]
    Malformed {
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// One of the required columns is absent from the header.
    #[error("CSV is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// The same header appears more than once.
    #[error("CSV has duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A `Date` cell is not a `YYYY-MM-DD` calendar date.
    #[error("row {row}: date '{value}' is not in YYYY-MM-DD format")]
    InvalidDate {
        row: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Header present but no records, so no date bounds exist.
    #[error("dataset contains no records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Filter validation errors (recoverable)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("start date {start} is after end date {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },
}
