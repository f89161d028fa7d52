//! Error types for dataset loading and analysis

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or querying the passenger dataset
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open dataset {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("invalid column '{0}'")]
    InvalidColumn(String),

    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },
}
