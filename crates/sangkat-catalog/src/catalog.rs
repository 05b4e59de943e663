//! In-memory district and commune index.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use sangkat_types::{Commune, Coordinates, LocationResolver, NotFoundError, Region};
use serde::Deserialize;

use crate::{DataLoadError, Result};

/// File name of the district dataset inside a data directory.
pub const DISTRICT_FILE: &str = "district.json";

/// File name of the commune dataset inside a data directory.
pub const COMMUNE_FILE: &str = "commune.json";

/// Phnom Penh districts embedded at compile time.
const DISTRICTS_JSON: &str = include_str!("../data/district.json");

/// Phnom Penh communes embedded at compile time.
const COMMUNES_JSON: &str = include_str!("../data/commune.json");

/// District entry as it appears in the source data.
#[derive(Debug, Deserialize)]
struct RawDistrict {
    en_name: String,
    #[serde(default)]
    slug: Option<String>,
}

/// Commune entry as it appears in the source data.
#[derive(Debug, Deserialize)]
struct RawCommune {
    en_name: String,
    district_slug: String,
    map: RawPoint,
}

/// `x` is latitude and `y` is longitude.
#[derive(Debug, Deserialize)]
struct RawPoint {
    x: f64,
    y: f64,
}

/// Read-only index of districts and their communes.
#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    /// Districts in source order.
    districts: Vec<Region>,
    /// Communes in source order.
    communes: Vec<Commune>,
    /// District slug to indices into `communes`, in source order.
    by_district: HashMap<String, Vec<usize>>,
}

impl ReferenceCatalog {
    /// Builds the catalog from the embedded Phnom Penh dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded data is malformed.
    pub fn embedded() -> Result<Self> {
        Self::parse(DISTRICTS_JSON, "embedded districts", COMMUNES_JSON, "embedded communes")
    }

    /// Builds the catalog from JSON strings.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError::Parse`] if either document is not valid JSON
    /// or an entry lacks a required field.
    pub fn from_json(districts_json: &str, communes_json: &str) -> Result<Self> {
        Self::parse(districts_json, "districts", communes_json, "communes")
    }

    /// Loads the catalog from a district file and a commune file.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError::Read`] if a file is missing or unreadable and
    /// [`DataLoadError::Parse`] if its contents are malformed.
    pub fn load_from(district_path: &Path, commune_path: &Path) -> Result<Self> {
        let districts = read_file(district_path)?;
        let communes = read_file(commune_path)?;
        Self::parse(
            &districts,
            &district_path.display().to_string(),
            &communes,
            &commune_path.display().to_string(),
        )
    }

    /// Loads [`DISTRICT_FILE`] and [`COMMUNE_FILE`] from a directory.
    ///
    /// # Errors
    ///
    /// See [`ReferenceCatalog::load_from`].
    pub fn load_dir(dir: &Path) -> Result<Self> {
        Self::load_from(&dir.join(DISTRICT_FILE), &dir.join(COMMUNE_FILE))
    }

    fn parse(
        districts_json: &str,
        districts_origin: &str,
        communes_json: &str,
        communes_origin: &str,
    ) -> Result<Self> {
        let raw_districts: Vec<RawDistrict> =
            serde_json::from_str(districts_json).map_err(|e| DataLoadError::Parse {
                origin: districts_origin.to_string(),
                source: e,
            })?;
        let raw_communes: Vec<RawCommune> =
            serde_json::from_str(communes_json).map_err(|e| DataLoadError::Parse {
                origin: communes_origin.to_string(),
                source: e,
            })?;

        let districts: Vec<Region> = raw_districts
            .into_iter()
            .map(|d| match d.slug {
                Some(slug) => Region::with_slug(d.en_name, slug),
                None => Region::new(d.en_name),
            })
            .collect();

        let communes: Vec<Commune> = raw_communes
            .into_iter()
            .map(|c| {
                Commune::new(
                    c.en_name,
                    c.district_slug,
                    Coordinates::new(c.map.x, c.map.y),
                )
            })
            .collect();

        let mut by_district: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, commune) in communes.iter().enumerate() {
            by_district
                .entry(commune.district_slug().to_string())
                .or_default()
                .push(i);
        }

        let orphaned = communes
            .iter()
            .filter(|c| !districts.iter().any(|d| d.slug() == c.district_slug()))
            .count();
        if orphaned > 0 {
            log::warn!("{orphaned} communes reference unknown districts and will be unreachable");
        }

        log::debug!(
            "Loaded reference catalog: {} districts, {} communes",
            districts.len(),
            communes.len()
        );

        Ok(Self {
            districts,
            communes,
            by_district,
        })
    }

    /// Returns all districts in source order.
    #[must_use]
    pub fn list_districts(&self) -> &[Region] {
        &self.districts
    }

    /// Looks up a district by slug.
    #[must_use]
    pub fn district(&self, slug: &str) -> Option<&Region> {
        self.districts.iter().find(|d| d.slug() == slug)
    }

    /// Looks up a district by its display name.
    #[must_use]
    pub fn district_by_name(&self, name: &str) -> Option<&Region> {
        self.districts.iter().find(|d| d.name() == name)
    }

    /// Returns the communes of a district in source order.
    ///
    /// Unknown districts and districts without communes yield an empty list.
    #[must_use]
    pub fn communes_in(&self, district_slug: &str) -> Vec<&Commune> {
        self.by_district
            .get(district_slug)
            .map(|indices| indices.iter().map(|&i| &self.communes[i]).collect())
            .unwrap_or_default()
    }

    /// Returns the coordinates of a commune within a district.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no commune in the district has exactly
    /// that name.
    pub fn coordinates_of(
        &self,
        district_slug: &str,
        commune_name: &str,
    ) -> std::result::Result<Coordinates, NotFoundError> {
        self.find_commune(district_slug, commune_name)
            .map(Commune::coordinates)
    }

    /// Returns the number of districts.
    #[must_use]
    pub fn district_count(&self) -> usize {
        self.districts.len()
    }

    /// Returns the total number of communes, including unreachable ones.
    #[must_use]
    pub fn commune_count(&self) -> usize {
        self.communes.len()
    }

    fn find_commune(
        &self,
        district_slug: &str,
        commune_name: &str,
    ) -> std::result::Result<&Commune, NotFoundError> {
        self.communes_in(district_slug)
            .into_iter()
            .find(|c| c.name() == commune_name)
            .ok_or_else(|| NotFoundError {
                district_slug: district_slug.to_string(),
                commune: commune_name.to_string(),
            })
    }
}

impl LocationResolver for ReferenceCatalog {
    fn district_named(&self, name: &str) -> Option<&Region> {
        self.district_by_name(name)
    }

    fn commune_in(
        &self,
        district_slug: &str,
        commune: &str,
    ) -> std::result::Result<&Commune, NotFoundError> {
        self.find_commune(district_slug, commune)
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| DataLoadError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}
