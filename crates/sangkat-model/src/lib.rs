//! Per-category price models for sangkat.
//!
//! This crate turns a validated [`EstimationRequest`] into a price:
//!
//! - [`Regressor`] - Opaque `features -> price` function
//! - [`ForestRegressor`] - Tree ensemble loaded from a JSON artifact
//! - [`LinearRegressor`] - Linear model loaded from a JSON artifact
//! - [`ModelArtifact`] - On-disk model format
//! - [`PricePredictor`] - Dispatches a request to its category's model
//! - [`feature_vector`] - Builds the model input for a request
//!
//! [`EstimationRequest`]: sangkat_types::EstimationRequest

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sangkat-estimate/sangkat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod artifact;
mod error;
mod predictor;

pub use artifact::{ForestRegressor, LinearRegressor, ModelArtifact, Regressor, Tree, TreeNode};
pub use error::{ModelLoadError, PredictionError};
pub use predictor::{PricePredictor, PricePredictorBuilder, feature_vector, model_file_name};
