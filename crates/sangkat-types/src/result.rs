//! Estimation results.

use serde::{Deserialize, Serialize};

use crate::{EstimationRequest, Money, PropertyType};

/// Outcome of one estimation run, as displayed and as stored in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    /// Property category.
    pub property_type: PropertyType,
    /// District display name.
    pub district: String,
    /// Commune display name.
    pub commune: String,
    /// Estimated price.
    pub price: Money,
    /// Size in square meters.
    pub size_sqm: f64,
    /// Number of bedrooms (zero unless a house).
    pub bedrooms: u32,
    /// Number of bathrooms (zero unless a house).
    pub bathrooms: u32,
}

impl EstimationResult {
    /// Shapes a result from a validated request and its predicted price.
    ///
    /// Room counts are zeroed for categories without rooms.
    #[must_use]
    pub fn from_request(request: &EstimationRequest, price: Money) -> Self {
        let property_type = request.property_type();
        let (bedrooms, bathrooms) = if property_type.has_rooms() {
            (request.bedrooms(), request.bathrooms())
        } else {
            (0, 0)
        };

        Self {
            property_type,
            district: request.district().name().to_string(),
            commune: request.commune().name().to_string(),
            price,
            size_sqm: request.size_sqm(),
            bedrooms,
            bathrooms,
        }
    }
}
