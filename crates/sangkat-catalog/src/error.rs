//! Catalog loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading reference data.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// A reference file could not be read.
    #[error("Failed to read reference data '{path}': {source}")]
    Read {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A reference dataset is not valid JSON or lacks required fields.
    #[error("Malformed reference data in {origin}: {source}")]
    Parse {
        /// File path or dataset name the data came from.
        origin: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, DataLoadError>;
