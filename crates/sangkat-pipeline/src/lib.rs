//! Estimation request pipeline for sangkat.
//!
//! A single synchronous pass per submission:
//!
//! 1. validate the raw form input against the reference data
//! 2. predict the price with the category's model
//! 3. shape an [`EstimationResult`](sangkat_types::EstimationResult)
//! 4. record it in the search history, logging and ignoring failures
//! 5. return it for display

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sangkat-estimate/sangkat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod pipeline;

pub use error::{PipelineError, Result};
pub use pipeline::{Estimate, EstimationPipeline};
