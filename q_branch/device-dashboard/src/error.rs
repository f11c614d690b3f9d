//! Error types shared by the loader and the compute engines.

use std::path::PathBuf;

/// Failure to produce a `Table` at startup.
///
/// Any of these leaves the process running without a dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("column '{column}' line {line}: cannot parse '{value}' as a number")]
    Parse {
        column: String,
        line: u64,
        value: String,
    },

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    #[error("column '{0}' must be numeric")]
    NotNumeric(String),

    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// Failure while computing statistics or charts for a single request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComputeError {
    #[error("column '{0}' is not available")]
    MissingColumn(String),

    #[error("column '{column}' holds {actual} values, expected {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },
}
