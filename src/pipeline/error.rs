//! Error types for the group comparison pipeline.
//!
//! Every stage returns `AnalysisError`. Failures are terminal for the
//! current run: the caller gets exactly one error and no partial report.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while loading, validating or analysing a dataset.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The data source does not exist or is not a regular file.
    #[error("Data source not found: {}", .path.display())]
    SourceNotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// The file extension does not map to a supported reader.
    #[error("Unsupported file format: '{extension}'. Supported formats: csv, parquet")]
    UnsupportedFormat {
        /// Lower-cased extension of the requested file
        extension: String,
    },

    /// The dataset does not have the expected shape: the label column is
    /// missing, or a feature column is non-numeric in strict mode.
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// Fewer than two distinct label values are present.
    #[error("Label column must contain at least two distinct values to compare groups, found {found}")]
    InsufficientGroups {
        /// Number of distinct non-null label values
        found: usize,
    },

    /// One of the two labels selected for ranking is not present in the data.
    #[error("Label value '{label}' not found in dataset (available: {})", .available.join(", "))]
    GroupNotFound {
        /// Requested label value
        label: String,
        /// Label values actually present, in ascending order
        available: Vec<String>,
    },

    /// Reading or casting through polars failed.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Result alias used throughout the pipeline.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
