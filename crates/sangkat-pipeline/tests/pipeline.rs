//! End-to-end runs over the embedded catalog, JSON models and an on-disk history.

use approx::assert_relative_eq;
use sangkat_catalog::ReferenceCatalog;
use sangkat_history::{SearchHistory, SqliteHistory, UnavailableHistory};
use sangkat_model::{PricePredictor, PredictionError, model_file_name};
use sangkat_pipeline::{EstimationPipeline, PipelineError};
use sangkat_types::{PropertyType, RawEstimationInput, ValidationError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HOUSE_MODEL: &str = r#"{
    "kind": "forest",
    "n_features": 5,
    "trees": [
        {"nodes": [
            {"feature": 2, "threshold": 100.0, "left": 1, "right": 2},
            {"value": 150000.0},
            {"value": 300000.0}
        ]},
        {"nodes": [
            {"feature": 3, "threshold": 2.5, "left": 1, "right": 2},
            {"value": 200000.0},
            {"value": 400000.0}
        ]}
    ]
}"#;

const CONDO_MODEL: &str = r#"{"kind": "linear", "intercept": 5000.0, "coefficients": [0.0, 0.0, 1200.0]}"#;

const LAND_MODEL: &str = r#"{
    "kind": "forest",
    "n_features": 3,
    "trees": [
        {"nodes": [{"value": 1000.0}]}
    ]
}"#;

fn write_models(dir: &Path, land: Option<&str>) {
    fs::write(dir.join(model_file_name(PropertyType::House)), HOUSE_MODEL).unwrap();
    fs::write(dir.join(model_file_name(PropertyType::Condo)), CONDO_MODEL).unwrap();
    if let Some(land) = land {
        fs::write(dir.join(model_file_name(PropertyType::Land)), land).unwrap();
    }
}

#[test]
fn test_estimates_are_priced_and_recorded() {
    let models = TempDir::new().unwrap();
    write_models(models.path(), Some(LAND_MODEL));
    let data = TempDir::new().unwrap();

    let catalog = ReferenceCatalog::embedded().unwrap();
    let predictor = PricePredictor::load_dir(models.path()).require_all().unwrap();
    let history = SqliteHistory::open(data.path().join("history.db")).unwrap();
    let pipeline = EstimationPipeline::new(&catalog, &predictor, &history);

    let house = RawEstimationInput::new("House", "Daun Penh", "Chakto Mukh", "120")
        .with_bedrooms("4")
        .with_bathrooms("4");
    let estimate = pipeline.run(&house).unwrap();
    // 120 sqm and 4 bedrooms take the right branch of both trees.
    assert_relative_eq!(estimate.result.price.amount(), 350_000.0);
    assert_eq!(estimate.result.price.to_string(), "$350,000");
    let house_id = estimate.record_id.unwrap();

    let condo = RawEstimationInput::new("Condo/Apartment", "Daun Penh", "Chakto Mukh", "80");
    let estimate = pipeline.run(&condo).unwrap();
    assert_relative_eq!(estimate.result.price.amount(), 101_000.0);
    assert_eq!(estimate.result.bedrooms, 0);
    let condo_id = estimate.record_id.unwrap();
    assert!(condo_id > house_id);

    let recent = pipeline.recent(10).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, condo_id);
    assert_eq!(recent[1].id, house_id);

    let shown = pipeline.show(house_id).unwrap().unwrap();
    assert_eq!(shown.result.property_type, PropertyType::House);
    assert_eq!(shown.result.commune, "Chakto Mukh");
    assert_eq!((shown.result.bedrooms, shown.result.bathrooms), (4, 4));
    assert_relative_eq!(shown.result.size_sqm, 120.0);
}

#[test]
fn test_history_survives_reopen() {
    let models = TempDir::new().unwrap();
    write_models(models.path(), Some(LAND_MODEL));
    let data = TempDir::new().unwrap();
    let db = data.path().join("history.db");

    let catalog = ReferenceCatalog::embedded().unwrap();
    let predictor = PricePredictor::load_dir(models.path());
    {
        let history = SqliteHistory::open(&db).unwrap();
        let pipeline = EstimationPipeline::new(&catalog, &predictor, &history);
        let land = RawEstimationInput::new("Land", "Daun Penh", "Chakto Mukh", "500");
        pipeline.run(&land).unwrap();
    }

    let reopened = SqliteHistory::open(&db).unwrap();
    let rows = reopened.recent(10).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].result.property_type, PropertyType::Land);
    assert_relative_eq!(rows[0].result.price.amount(), 1000.0);
}

#[test]
fn test_rejected_input_is_not_recorded() {
    let models = TempDir::new().unwrap();
    write_models(models.path(), Some(LAND_MODEL));
    let data = TempDir::new().unwrap();

    let catalog = ReferenceCatalog::embedded().unwrap();
    let predictor = PricePredictor::load_dir(models.path());
    let history = SqliteHistory::open(data.path().join("history.db")).unwrap();
    let pipeline = EstimationPipeline::new(&catalog, &predictor, &history);

    let unknown = RawEstimationInput::new("Land", "Daun Penh", "Nowhere", "500");
    assert!(matches!(
        pipeline.run(&unknown),
        Err(PipelineError::Validation(ValidationError::UnknownLocation { .. }))
    ));

    let bad_size = RawEstimationInput::new("Land", "Daun Penh", "Chakto Mukh", "big");
    assert!(matches!(
        pipeline.run(&bad_size),
        Err(PipelineError::Validation(ValidationError::InvalidSize(_)))
    ));

    assert!(pipeline.recent(10).unwrap().is_empty());
}

#[test]
fn test_missing_model_only_blocks_its_category() {
    let models = TempDir::new().unwrap();
    write_models(models.path(), None);
    let data = TempDir::new().unwrap();

    let catalog = ReferenceCatalog::embedded().unwrap();
    let predictor = PricePredictor::load_dir(models.path());
    assert_eq!(
        predictor.available(),
        vec![PropertyType::House, PropertyType::Condo]
    );

    let history = SqliteHistory::open(data.path().join("history.db")).unwrap();
    let pipeline = EstimationPipeline::new(&catalog, &predictor, &history);

    let land = RawEstimationInput::new("Land", "Daun Penh", "Chakto Mukh", "500");
    assert!(matches!(
        pipeline.run(&land),
        Err(PipelineError::PredictionFailed(
            PredictionError::ModelUnavailable {
                property_type: PropertyType::Land,
                ..
            }
        ))
    ));

    let condo = RawEstimationInput::new("Condo", "Daun Penh", "Chakto Mukh", "40");
    assert!(pipeline.run(&condo).is_ok());
    assert_eq!(pipeline.recent(10).unwrap().len(), 1);
}

#[test]
fn test_unopenable_history_still_estimates() {
    let models = TempDir::new().unwrap();
    write_models(models.path(), Some(LAND_MODEL));
    let blocker = models.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let db = blocker.join("history.db");

    let catalog = ReferenceCatalog::embedded().unwrap();
    let predictor = PricePredictor::load_dir(models.path());
    let error = SqliteHistory::open(&db).unwrap_err();
    let history = UnavailableHistory::new(&db, &error);
    let pipeline = EstimationPipeline::new(&catalog, &predictor, &history);

    let land = RawEstimationInput::new("Land", "Daun Penh", "Chakto Mukh", "500");
    let estimate = pipeline.run(&land).unwrap();
    assert_relative_eq!(estimate.result.price.amount(), 1000.0);
    assert_eq!(estimate.record_id, None);

    assert!(matches!(pipeline.recent(10), Err(PipelineError::History(_))));
}
