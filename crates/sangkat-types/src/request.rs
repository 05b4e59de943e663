//! Raw form input and its validated counterpart.

use crate::{Commune, Coordinates, LocationResolver, PropertyType, Region, ValidationError};

/// Placeholder shown in the district selector before a choice is made.
pub const DISTRICT_PLACEHOLDER: &str = "Select your District/Khan";

/// Placeholder shown in the commune selector before a choice is made.
pub const COMMUNE_PLACEHOLDER: &str = "Select your commune/Sangkat";

/// Unvalidated form fields exactly as the user entered them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEstimationInput {
    /// Property type label or id (e.g. "House", "condo", "3").
    pub property_type: String,
    /// District display name.
    pub district: String,
    /// Commune display name.
    pub commune: String,
    /// Size in square meters.
    pub size: String,
    /// Number of bedrooms; `None` or blank means zero.
    pub bedrooms: Option<String>,
    /// Number of bathrooms; `None` or blank means zero.
    pub bathrooms: Option<String>,
}

impl RawEstimationInput {
    /// Creates raw input with the required fields and no room counts.
    #[must_use]
    pub fn new(
        property_type: impl Into<String>,
        district: impl Into<String>,
        commune: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            property_type: property_type.into(),
            district: district.into(),
            commune: commune.into(),
            size: size.into(),
            bedrooms: None,
            bathrooms: None,
        }
    }

    /// Sets the bedrooms field.
    #[must_use]
    pub fn with_bedrooms(mut self, bedrooms: impl Into<String>) -> Self {
        self.bedrooms = Some(bedrooms.into());
        self
    }

    /// Sets the bathrooms field.
    #[must_use]
    pub fn with_bathrooms(mut self, bathrooms: impl Into<String>) -> Self {
        self.bathrooms = Some(bathrooms.into());
        self
    }
}

/// A validated estimation request.
///
/// Only obtainable through [`EstimationRequest::validate`]. Size is always
/// positive and room counts are zero unless the property is a house.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationRequest {
    property_type: PropertyType,
    district: Region,
    commune: Commune,
    size_sqm: f64,
    bedrooms: u32,
    bathrooms: u32,
}

impl EstimationRequest {
    /// Validates raw form input against the reference data.
    ///
    /// Checks run in this order and the first failure is returned:
    /// property type, commune selection, size, bedrooms, bathrooms, location.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first field that fails.
    pub fn validate<R>(raw: &RawEstimationInput, resolver: &R) -> Result<Self, ValidationError>
    where
        R: LocationResolver + ?Sized,
    {
        let property_type = raw
            .property_type
            .parse::<PropertyType>()
            .map_err(|_| ValidationError::MissingPropertyType)?;

        let commune_name = raw.commune.trim();
        if commune_name.is_empty() || commune_name == COMMUNE_PLACEHOLDER {
            return Err(ValidationError::MissingCommune);
        }

        let size_sqm = parse_size(&raw.size)?;
        let bedrooms = parse_count(raw.bedrooms.as_deref()).ok_or_else(|| {
            ValidationError::InvalidBedrooms(raw.bedrooms.clone().unwrap_or_default())
        })?;
        let bathrooms = parse_count(raw.bathrooms.as_deref()).ok_or_else(|| {
            ValidationError::InvalidBathrooms(raw.bathrooms.clone().unwrap_or_default())
        })?;

        let unknown = || ValidationError::UnknownLocation {
            district: raw.district.clone(),
            commune: raw.commune.clone(),
        };

        let district_name = raw.district.trim();
        if district_name == DISTRICT_PLACEHOLDER {
            return Err(unknown());
        }
        let district = resolver.district_named(district_name).ok_or_else(unknown)?;
        let commune = resolver
            .commune_in(district.slug(), commune_name)
            .map_err(|_| unknown())?;

        let (bedrooms, bathrooms) = if property_type.has_rooms() {
            (bedrooms, bathrooms)
        } else {
            (0, 0)
        };

        Ok(Self {
            property_type,
            district: district.clone(),
            commune: commune.clone(),
            size_sqm,
            bedrooms,
            bathrooms,
        })
    }

    /// Returns the property type.
    #[must_use]
    pub const fn property_type(&self) -> PropertyType {
        self.property_type
    }

    /// Returns the resolved district.
    #[must_use]
    pub const fn district(&self) -> &Region {
        &self.district
    }

    /// Returns the resolved commune.
    #[must_use]
    pub const fn commune(&self) -> &Commune {
        &self.commune
    }

    /// Returns the commune coordinates.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        self.commune.coordinates()
    }

    /// Returns the size in square meters.
    #[must_use]
    pub const fn size_sqm(&self) -> f64 {
        self.size_sqm
    }

    /// Returns the number of bedrooms (zero unless a house).
    #[must_use]
    pub const fn bedrooms(&self) -> u32 {
        self.bedrooms
    }

    /// Returns the number of bathrooms (zero unless a house).
    #[must_use]
    pub const fn bathrooms(&self) -> u32 {
        self.bathrooms
    }
}

fn parse_size(raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|size| size.is_finite() && *size > 0.0)
        .ok_or_else(|| ValidationError::InvalidSize(raw.to_string()))
}

/// Parses an optional room count. Absent or blank input counts as zero.
fn parse_count(raw: Option<&str>) -> Option<u32> {
    match raw.map(str::trim) {
        None | Some("") => Some(0),
        Some(s) => s.parse().ok(),
    }
}
