//! Error types shared across sangkat crates.

use thiserror::Error;

/// Errors reported when raw form input cannot become an [`EstimationRequest`].
///
/// Checks run in a fixed order and the first failure is reported.
///
/// [`EstimationRequest`]: crate::EstimationRequest
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No recognised property type was selected.
    #[error("Please select a property type (house, condo or land)")]
    MissingPropertyType,

    /// The commune was left empty or at the placeholder entry.
    #[error("Please select a commune")]
    MissingCommune,

    /// Size is not a positive number.
    #[error("Invalid size: {0:?} (expected a positive number of square meters)")]
    InvalidSize(String),

    /// Bedrooms is not a non-negative integer.
    #[error("Invalid number of bedrooms: {0:?}")]
    InvalidBedrooms(String),

    /// Bathrooms is not a non-negative integer.
    #[error("Invalid number of bathrooms: {0:?}")]
    InvalidBathrooms(String),

    /// The district/commune pair has no known coordinates.
    #[error("Unknown location: commune {commune:?} in district {district:?}")]
    UnknownLocation {
        /// District display name as submitted.
        district: String,
        /// Commune display name as submitted.
        commune: String,
    },
}

/// A commune lookup that matched nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No commune named {commune:?} in district {district_slug:?}")]
pub struct NotFoundError {
    /// Slug of the district that was searched.
    pub district_slug: String,
    /// Commune display name that was looked up.
    pub commune: String,
}
