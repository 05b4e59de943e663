//! Pipeline errors.

use sangkat_history::StoreError;
use sangkat_model::PredictionError;
use sangkat_types::ValidationError;
use thiserror::Error;

/// Errors surfaced to the caller of the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The form input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The price model could not produce an estimate.
    #[error("Price estimation failed: {0}")]
    PredictionFailed(#[from] PredictionError),

    /// Reading the search history failed.
    #[error("Search history unavailable: {0}")]
    History(#[from] StoreError),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
