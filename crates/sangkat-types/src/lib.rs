//! Core types for the sangkat property price estimator.
//!
//! This crate provides the fundamental data structures used throughout sangkat:
//!
//! - [`PropertyType`] - Property category (house, condo, land)
//! - [`Money`] - Non-negative currency amount, formatted only for display
//! - [`Region`] and [`Commune`] - Administrative reference data
//! - [`EstimationRequest`] - Validated form input, built via [`EstimationRequest::validate`]
//! - [`EstimationResult`] - Outcome of one estimation run
//! - [`LocationResolver`] - Lookup seam between validation and the reference catalog

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sangkat-estimate/sangkat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod location;
mod money;
mod property;
mod request;
mod result;

pub use error::{NotFoundError, ValidationError};
pub use location::{Commune, Coordinates, LocationResolver, Region, district_slug};
pub use money::Money;
pub use property::{PropertyType, PropertyTypeParseError};
pub use request::{
    COMMUNE_PLACEHOLDER, DISTRICT_PLACEHOLDER, EstimationRequest, RawEstimationInput,
};
pub use result::EstimationResult;
