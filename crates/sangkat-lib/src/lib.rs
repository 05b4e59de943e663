//! Property price estimates for Phnom Penh districts and communes.
//!
//! This is a facade crate that re-exports the sangkat workspace crates.
//!
//! # Quick Start
//!
//! ```no_run
//! use sangkat_lib::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = ReferenceCatalog::embedded()?;
//!     let predictor = PricePredictor::load_dir(Path::new("model")).require_all()?;
//!     let history = SqliteHistory::with_default_path()?;
//!     let pipeline = EstimationPipeline::new(&catalog, &predictor, &history);
//!
//!     let input = RawEstimationInput::new("House", "Daun Penh", "Chakto Mukh", "120")
//!         .with_bedrooms("4")
//!         .with_bathrooms("3");
//!     let estimate = pipeline.run(&input)?;
//!     println!("{}", estimate.result.price);
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sangkat-estimate/sangkat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub use sangkat_types::*;

pub use sangkat_catalog::{COMMUNE_FILE, DISTRICT_FILE, DataLoadError, ReferenceCatalog};

pub use sangkat_model::{
    ForestRegressor, LinearRegressor, ModelArtifact, ModelLoadError, PredictionError,
    PricePredictor, PricePredictorBuilder, Regressor, Tree, TreeNode, feature_vector,
    model_file_name,
};

#[cfg(feature = "history")]
pub use sangkat_history::{
    DATABASE_FILE, DEFAULT_RECENT_LIMIT, RecordId, SearchHistory, SearchHistoryRecord,
    SqliteHistory, StoreError, UnavailableHistory,
};

#[cfg(feature = "history")]
pub use sangkat_pipeline::{Estimate, EstimationPipeline, PipelineError};

/// Prelude module for convenient imports.
///
/// ```
/// use sangkat_lib::prelude::*;
/// ```
pub mod prelude {
    pub use sangkat_types::{
        Commune, Coordinates, EstimationRequest, EstimationResult, LocationResolver, Money,
        PropertyType, RawEstimationInput, Region, ValidationError,
    };

    pub use sangkat_catalog::ReferenceCatalog;

    pub use sangkat_model::{PredictionError, PricePredictor, Regressor};

    #[cfg(feature = "history")]
    pub use sangkat_history::{RecordId, SearchHistory, SearchHistoryRecord, SqliteHistory};

    #[cfg(feature = "history")]
    pub use sangkat_pipeline::{Estimate, EstimationPipeline, PipelineError};
}
