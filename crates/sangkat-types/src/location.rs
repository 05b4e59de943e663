//! Districts, communes and their coordinates.

use serde::{Deserialize, Serialize};

use crate::NotFoundError;

/// Derives a district slug from its display name.
///
/// Lowercases the name and replaces spaces with hyphens, so
/// `"Daun Penh"` becomes `"daun-penh"`. Catalog construction and commune
/// lookup both go through this function.
#[must_use]
pub fn district_slug(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

/// Geographic position of a commune.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// A district (khan) that groups communes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    name: String,
    slug: String,
}

impl Region {
    /// Creates a region, deriving the slug from the name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = district_slug(&name);
        Self { name, slug }
    }

    /// Creates a region with an explicit slug supplied by the data source.
    #[must_use]
    pub fn with_slug(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }

    /// Returns the display name (e.g. "Daun Penh").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the slug (e.g. "daun-penh").
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A commune (sangkat) inside a district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commune {
    name: String,
    district_slug: String,
    coordinates: Coordinates,
}

impl Commune {
    /// Creates a commune.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        district_slug: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            name: name.into(),
            district_slug: district_slug.into(),
            coordinates,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the slug of the owning district.
    #[must_use]
    pub fn district_slug(&self) -> &str {
        &self.district_slug
    }

    /// Returns the commune coordinates.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

impl std::fmt::Display for Commune {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Resolves submitted district and commune names to reference data.
///
/// Implemented by the reference catalog; kept as a trait so request
/// validation does not depend on how the catalog is loaded.
pub trait LocationResolver {
    /// Looks up a district by its display name.
    fn district_named(&self, name: &str) -> Option<&Region>;

    /// Looks up a commune by exact display name within a district.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no commune in the district has that name.
    fn commune_in(&self, district_slug: &str, commune: &str) -> Result<&Commune, NotFoundError>;
}
