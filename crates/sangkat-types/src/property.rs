//! Property categories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Property category. Each category is priced by its own model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Detached house, villa or flat with rooms.
    House,
    /// Condominium or apartment unit.
    Condo,
    /// Bare land plot.
    Land,
}

/// Error returned when a string does not name a property type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown property type: {0}. Valid options: house, condo, land")]
pub struct PropertyTypeParseError(pub String);

impl PropertyType {
    /// Returns all property types in form order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::House, Self::Condo, Self::Land]
    }

    /// Returns the lowercase identifier (e.g. `"condo"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Condo => "condo",
            Self::Land => "land",
        }
    }

    /// Returns the human-readable label shown in forms and stored in history.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::House => "House",
            Self::Condo => "Condo/Apartment",
            Self::Land => "Land",
        }
    }

    /// Returns true if bedroom and bathroom counts apply to this category.
    #[must_use]
    pub const fn has_rooms(&self) -> bool {
        matches!(self, Self::House)
    }

    /// Returns the number of model features for this category.
    #[must_use]
    pub const fn feature_count(&self) -> usize {
        match self {
            Self::House => 5,
            Self::Condo | Self::Land => 3,
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for PropertyType {
    type Err = PropertyTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "house" | "1" => Ok(Self::House),
            "condo" | "apartment" | "condo/apartment" | "2" => Ok(Self::Condo),
            "land" | "3" => Ok(Self::Land),
            _ => Err(PropertyTypeParseError(s.to_string())),
        }
    }
}
