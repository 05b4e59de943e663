//! Category dispatch from requests to price models.

use std::path::Path;

use sangkat_types::{EstimationRequest, Money, PropertyType};

use crate::{ModelArtifact, PredictionError, Regressor};

/// Returns the artifact file name for a category inside a model directory.
#[must_use]
pub const fn model_file_name(property_type: PropertyType) -> &'static str {
    match property_type {
        PropertyType::House => "house_rf.json",
        PropertyType::Condo => "condo_rf.json",
        PropertyType::Land => "land_rf.json",
    }
}

/// Builds the model input for a request.
///
/// Houses use `[lat, lon, size, bedrooms, bathrooms]`; condos and land use
/// `[lat, lon, size]`.
#[must_use]
pub fn feature_vector(request: &EstimationRequest) -> Vec<f64> {
    let coords = request.coordinates();
    match request.property_type() {
        PropertyType::House => vec![
            coords.latitude,
            coords.longitude,
            request.size_sqm(),
            f64::from(request.bedrooms()),
            f64::from(request.bathrooms()),
        ],
        PropertyType::Condo | PropertyType::Land => {
            vec![coords.latitude, coords.longitude, request.size_sqm()]
        }
    }
}

/// A category's model, or the reason it could not be loaded.
#[derive(Debug)]
enum ModelSlot {
    Ready(Box<dyn Regressor>),
    Unavailable(String),
}

impl ModelSlot {
    fn from_option(model: Option<Box<dyn Regressor>>) -> Self {
        model.map_or_else(
            || Self::Unavailable("no model configured".to_string()),
            Self::Ready,
        )
    }
}

/// Estimates prices by dispatching each request to its category's model.
///
/// Condo and land have the same feature shape but separate models.
#[derive(Debug)]
pub struct PricePredictor {
    house: ModelSlot,
    condo: ModelSlot,
    land: ModelSlot,
}

impl PricePredictor {
    /// Returns a builder for injecting models directly.
    #[must_use]
    pub fn builder() -> PricePredictorBuilder {
        PricePredictorBuilder::default()
    }

    /// Loads the three category models from a directory.
    ///
    /// A model that is missing, malformed or built for the wrong number of
    /// features leaves its category unavailable; the failure is logged and
    /// reported by [`PricePredictor::unavailable`]. Use
    /// [`PricePredictor::require_all`] to treat that as fatal.
    #[must_use]
    pub fn load_dir(dir: &Path) -> Self {
        let load = |property_type: PropertyType| {
            let path = dir.join(model_file_name(property_type));
            let slot = match ModelArtifact::load(&path) {
                Ok(artifact) => {
                    let model = artifact.into_regressor();
                    match model.n_features() {
                        Some(n) if n != property_type.feature_count() => {
                            ModelSlot::Unavailable(format!(
                                "model at '{}' expects {n} features, {property_type} provides {}",
                                path.display(),
                                property_type.feature_count()
                            ))
                        }
                        _ => ModelSlot::Ready(model),
                    }
                }
                Err(e) => ModelSlot::Unavailable(e.to_string()),
            };

            match &slot {
                ModelSlot::Ready(_) => {
                    log::debug!("Loaded {property_type} model from {}", path.display());
                }
                ModelSlot::Unavailable(reason) => {
                    log::warn!("{property_type} estimates unavailable: {reason}");
                }
            }
            slot
        };

        Self {
            house: load(PropertyType::House),
            condo: load(PropertyType::Condo),
            land: load(PropertyType::Land),
        }
    }

    /// Fails if any category is missing its model.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::ModelUnavailable`] for the first
    /// category without a model.
    pub fn require_all(self) -> Result<Self, PredictionError> {
        for property_type in PropertyType::all() {
            if let ModelSlot::Unavailable(reason) = self.slot(*property_type) {
                return Err(PredictionError::ModelUnavailable {
                    property_type: *property_type,
                    reason: reason.clone(),
                });
            }
        }
        Ok(self)
    }

    /// Returns the categories that have a model.
    #[must_use]
    pub fn available(&self) -> Vec<PropertyType> {
        PropertyType::all()
            .iter()
            .copied()
            .filter(|ty| matches!(self.slot(*ty), ModelSlot::Ready(_)))
            .collect()
    }

    /// Returns the categories without a model and the reason for each.
    #[must_use]
    pub fn unavailable(&self) -> Vec<(PropertyType, &str)> {
        PropertyType::all()
            .iter()
            .filter_map(|ty| match self.slot(*ty) {
                ModelSlot::Unavailable(reason) => Some((*ty, reason.as_str())),
                ModelSlot::Ready(_) => None,
            })
            .collect()
    }

    /// Estimates the price for a validated request.
    ///
    /// The raw model output is wrapped without rounding.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::ModelUnavailable`] if the category has no
    /// model, [`PredictionError::FeatureMismatch`] if the model was trained
    /// on a different feature count, and [`PredictionError::InvalidOutput`]
    /// if the model returns a negative or non-finite value.
    pub fn estimate(&self, request: &EstimationRequest) -> Result<Money, PredictionError> {
        let property_type = request.property_type();
        let model = match self.slot(property_type) {
            ModelSlot::Ready(model) => model,
            ModelSlot::Unavailable(reason) => {
                return Err(PredictionError::ModelUnavailable {
                    property_type,
                    reason: reason.clone(),
                });
            }
        };

        let features = feature_vector(request);
        if let Some(expected) = model.n_features()
            && expected != features.len()
        {
            return Err(PredictionError::FeatureMismatch {
                property_type,
                expected,
                actual: features.len(),
            });
        }

        let value = model.predict(&features);
        log::debug!("{property_type} model: {features:?} -> {value}");

        Money::new(value).ok_or(PredictionError::InvalidOutput {
            property_type,
            value,
        })
    }

    const fn slot(&self, property_type: PropertyType) -> &ModelSlot {
        match property_type {
            PropertyType::House => &self.house,
            PropertyType::Condo => &self.condo,
            PropertyType::Land => &self.land,
        }
    }
}

/// Builder for a [`PricePredictor`] with injected models.
#[derive(Debug, Default)]
pub struct PricePredictorBuilder {
    house: Option<Box<dyn Regressor>>,
    condo: Option<Box<dyn Regressor>>,
    land: Option<Box<dyn Regressor>>,
}

impl PricePredictorBuilder {
    /// Sets the house model.
    #[must_use]
    pub fn house(mut self, model: impl Regressor + 'static) -> Self {
        self.house = Some(Box::new(model));
        self
    }

    /// Sets the condo model.
    #[must_use]
    pub fn condo(mut self, model: impl Regressor + 'static) -> Self {
        self.condo = Some(Box::new(model));
        self
    }

    /// Sets the land model.
    #[must_use]
    pub fn land(mut self, model: impl Regressor + 'static) -> Self {
        self.land = Some(Box::new(model));
        self
    }

    /// Builds the predictor. Categories without a model are unavailable.
    #[must_use]
    pub fn build(self) -> PricePredictor {
        PricePredictor {
            house: ModelSlot::from_option(self.house),
            condo: ModelSlot::from_option(self.condo),
            land: ModelSlot::from_option(self.land),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinearRegressor;
    use approx::assert_relative_eq;
    use sangkat_catalog::ReferenceCatalog;
    use sangkat_types::RawEstimationInput;
    use std::fs;
    use tempfile::TempDir;

    /// Returns a fixed price regardless of input.
    #[derive(Debug)]
    struct Constant(f64);

    impl Regressor for Constant {
        fn predict(&self, _features: &[f64]) -> f64 {
            self.0
        }
    }

    fn request(raw: &RawEstimationInput) -> EstimationRequest {
        let catalog = ReferenceCatalog::embedded().unwrap();
        EstimationRequest::validate(raw, &catalog).unwrap()
    }

    fn house() -> EstimationRequest {
        request(
            &RawEstimationInput::new("House", "Daun Penh", "Chakto Mukh", "120")
                .with_bedrooms("4")
                .with_bathrooms("3"),
        )
    }

    fn land() -> EstimationRequest {
        request(
            &RawEstimationInput::new("Land", "Daun Penh", "Chakto Mukh", "300")
                .with_bedrooms("4")
                .with_bathrooms("3"),
        )
    }

    #[test]
    fn test_house_feature_vector() {
        let req = house();
        let coords = req.coordinates();
        assert_eq!(
            feature_vector(&req),
            vec![coords.latitude, coords.longitude, 120.0, 4.0, 3.0]
        );
    }

    #[test]
    fn test_land_feature_vector() {
        let req = land();
        let coords = req.coordinates();
        assert_eq!(
            feature_vector(&req),
            vec![coords.latitude, coords.longitude, 300.0]
        );
    }

    #[test]
    fn test_dispatches_by_category() {
        let predictor = PricePredictor::builder()
            .house(Constant(250_000.0))
            .condo(Constant(90_000.0))
            .land(Constant(400_000.0))
            .build();

        assert_relative_eq!(predictor.estimate(&house()).unwrap().amount(), 250_000.0);
        assert_relative_eq!(predictor.estimate(&land()).unwrap().amount(), 400_000.0);

        let condo = request(&RawEstimationInput::new(
            "Condo/Apartment",
            "Daun Penh",
            "Chakto Mukh",
            "65",
        ));
        assert_relative_eq!(predictor.estimate(&condo).unwrap().amount(), 90_000.0);
    }

    #[test]
    fn test_missing_model_is_unavailable() {
        let predictor = PricePredictor::builder().house(Constant(1.0)).build();

        let err = predictor.estimate(&land()).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::ModelUnavailable {
                property_type: PropertyType::Land,
                ..
            }
        ));
        assert_eq!(predictor.available(), vec![PropertyType::House]);
        assert_eq!(predictor.unavailable().len(), 2);
        assert!(predictor.require_all().is_err());
    }

    #[test]
    fn test_feature_mismatch() {
        // A three-feature model wired in as the house model.
        let predictor = PricePredictor::builder()
            .house(LinearRegressor::new(0.0, vec![1.0, 1.0, 1.0]))
            .build();

        assert_eq!(
            predictor.estimate(&house()),
            Err(PredictionError::FeatureMismatch {
                property_type: PropertyType::House,
                expected: 3,
                actual: 5,
            })
        );
    }

    #[test]
    fn test_invalid_output() {
        let predictor = PricePredictor::builder()
            .land(Constant(-10.0))
            .house(Constant(f64::NAN))
            .build();

        assert!(matches!(
            predictor.estimate(&land()),
            Err(PredictionError::InvalidOutput { value, .. }) if value == -10.0
        ));
        assert!(matches!(
            predictor.estimate(&house()),
            Err(PredictionError::InvalidOutput { .. })
        ));
    }

    #[test]
    fn test_raw_output_not_rounded() {
        let predictor = PricePredictor::builder().land(Constant(123_456.789)).build();
        assert_eq!(predictor.estimate(&land()).unwrap().amount(), 123_456.789);
    }

    #[test]
    fn test_load_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("house_rf.json"),
            r#"{"kind": "linear", "intercept": 0.0, "coefficients": [0.0, 0.0, 1000.0, 5000.0, 2000.0]}"#,
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("condo_rf.json"),
            r#"{"kind": "linear", "intercept": 0.0, "coefficients": [0.0, 0.0, 1500.0]}"#,
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("land_rf.json"),
            r#"{"kind": "forest", "n_features": 3, "trees": [{"nodes": [{"value": 80000.0}]}]}"#,
        )
        .unwrap();

        let predictor = PricePredictor::load_dir(temp_dir.path()).require_all().unwrap();
        assert_eq!(predictor.available().len(), 3);

        // 120 * 1000 + 4 * 5000 + 3 * 2000
        assert_relative_eq!(predictor.estimate(&house()).unwrap().amount(), 146_000.0);
        assert_relative_eq!(predictor.estimate(&land()).unwrap().amount(), 80_000.0);
    }

    #[test]
    fn test_load_dir_rejects_wrong_feature_count() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("condo_rf.json"),
            r#"{"kind": "linear", "intercept": 0.0, "coefficients": [1.0, 1.0, 1.0, 1.0, 1.0]}"#,
        )
        .unwrap();

        let predictor = PricePredictor::load_dir(temp_dir.path());
        assert!(predictor.available().is_empty());

        let reasons = predictor.unavailable();
        let (_, condo_reason) = reasons
            .iter()
            .find(|(ty, _)| *ty == PropertyType::Condo)
            .unwrap();
        assert!(condo_reason.contains("expects 5 features"));
    }

    #[test]
    fn test_model_file_names() {
        assert_eq!(model_file_name(PropertyType::House), "house_rf.json");
        assert_eq!(model_file_name(PropertyType::Condo), "condo_rf.json");
        assert_eq!(model_file_name(PropertyType::Land), "land_rf.json");
    }
}
