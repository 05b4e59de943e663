//! Model loading and prediction errors.

use std::path::PathBuf;

use sangkat_types::PropertyType;
use thiserror::Error;

/// Errors that can occur while loading a model artifact.
#[derive(Error, Debug)]
pub enum ModelLoadError {
    /// The artifact file could not be read.
    #[error("Failed to read model '{path}': {source}")]
    Read {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The artifact is not valid JSON or does not match the model schema.
    #[error("Failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),

    /// The artifact parsed but describes an unusable model.
    #[error("Invalid model: {0}")]
    Invalid(String),
}

/// Errors that can occur when estimating a price.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// No model is loaded for the property category.
    #[error("No {property_type} price model available: {reason}")]
    ModelUnavailable {
        /// The category whose model is missing.
        property_type: PropertyType,
        /// Why the model is missing.
        reason: String,
    },

    /// The model expects a different number of features than the category provides.
    #[error("{property_type} model expects {expected} features, got {actual}")]
    FeatureMismatch {
        /// The category being estimated.
        property_type: PropertyType,
        /// Feature count declared by the model.
        expected: usize,
        /// Feature count built for the category.
        actual: usize,
    },

    /// The model produced a negative or non-finite price.
    #[error("{property_type} model returned an invalid price: {value}")]
    InvalidOutput {
        /// The category being estimated.
        property_type: PropertyType,
        /// The raw model output.
        value: f64,
    },
}
