//! Estimate command implementation.
//!
//! Runs a single estimate. When every required field is given on the command
//! line the input goes straight to the pipeline; otherwise the missing fields
//! are collected with an interactive form.

use crate::display::print_result;
use anyhow::{Context, Result};
use clap::Args;
use inquire::{Select, Text};
use sangkat_lib::prelude::*;
use std::path::Path;

/// Arguments of the `estimate` command.
#[derive(Args, Default)]
pub(crate) struct EstimateArgs {
    /// Property type (house, condo, land)
    #[arg(short = 't', long = "type")]
    property_type: Option<String>,

    /// District (Khan) name
    #[arg(short, long)]
    district: Option<String>,

    /// Commune (Sangkat) name
    #[arg(short, long)]
    commune: Option<String>,

    /// Size in square meters
    #[arg(short, long)]
    size: Option<String>,

    /// Number of bedrooms (houses only)
    #[arg(long)]
    bedrooms: Option<String>,

    /// Number of bathrooms (houses only)
    #[arg(long)]
    bathrooms: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl EstimateArgs {
    /// Returns the input as given if no required field is missing.
    fn complete_input(&self) -> Option<RawEstimationInput> {
        let mut raw = RawEstimationInput::new(
            self.property_type.as_deref()?,
            self.district.as_deref()?,
            self.commune.as_deref()?,
            self.size.as_deref()?,
        );
        raw.bedrooms.clone_from(&self.bedrooms);
        raw.bathrooms.clone_from(&self.bathrooms);
        Some(raw)
    }
}

/// Execute the estimate command.
pub(crate) fn estimate(
    args: &EstimateArgs,
    data_dir: Option<&Path>,
    model_dir: &Path,
    db: Option<&Path>,
) -> Result<()> {
    let estimate = run_estimate(args, data_dir, model_dir, db)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate.result)?);
    } else {
        print_result(&estimate.result);
        if let Some(id) = estimate.record_id {
            println!("\nSaved as search #{id}");
        }
    }

    Ok(())
}

fn run_estimate(
    args: &EstimateArgs,
    data_dir: Option<&Path>,
    model_dir: &Path,
    db: Option<&Path>,
) -> Result<Estimate> {
    let catalog = super::load_catalog(data_dir)?;
    let predictor = PricePredictor::load_dir(model_dir)
        .require_all()
        .with_context(|| format!("Price models in {} are incomplete", model_dir.display()))?;
    let history = super::open_history_for_recording(db);

    let raw = match args.complete_input() {
        Some(raw) => raw,
        None => prompt_input(args, &catalog)?,
    };

    let pipeline = EstimationPipeline::new(&catalog, &predictor, &*history);
    Ok(pipeline.run(&raw)?)
}

/// Collects the fields missing from `args` with an interactive form.
///
/// Values given as flags are passed on unchanged so the pipeline reports
/// problems in its usual order. A flag that makes the form impossible to
/// continue fails with the error validation would have produced.
fn prompt_input(args: &EstimateArgs, catalog: &ReferenceCatalog) -> Result<RawEstimationInput> {
    let property_type = match &args.property_type {
        Some(ty) => ty
            .parse::<PropertyType>()
            .map_err(|_| PipelineError::from(ValidationError::MissingPropertyType))?,
        None => Select::new("Property type:", PropertyType::all().to_vec())
            .prompt()
            .context("Estimate cancelled")?,
    };

    let (district, region) = match &args.district {
        Some(name) => (name.clone(), catalog.district_by_name(name)),
        None => {
            let districts = catalog.list_districts().iter().collect::<Vec<_>>();
            let region = Select::new("District/Khan:", districts)
                .prompt()
                .context("Estimate cancelled")?;
            (region.name().to_string(), Some(region))
        }
    };

    let commune = match (&args.commune, region) {
        (Some(name), _) => name.clone(),
        (None, Some(region)) => {
            let communes = catalog.communes_in(region.slug());
            if communes.is_empty() {
                log::warn!("No communes listed for {region}");
                return Err(PipelineError::from(ValidationError::MissingCommune).into());
            }
            Select::new("Commune/Sangkat:", communes)
                .prompt()
                .context("Estimate cancelled")?
                .name()
                .to_string()
        }
        (None, None) => {
            log::warn!("Unknown district {district}, no communes to choose from");
            return Err(PipelineError::from(ValidationError::MissingCommune).into());
        }
    };

    let size = match &args.size {
        Some(size) => size.clone(),
        None => ask("Size (sqm):")?,
    };

    let mut raw = RawEstimationInput::new(property_type.as_str(), district, commune, size);
    if property_type.has_rooms() {
        raw.bedrooms = Some(match &args.bedrooms {
            Some(n) => n.clone(),
            None => ask("Bedrooms:")?,
        });
        raw.bathrooms = Some(match &args.bathrooms {
            Some(n) => n.clone(),
            None => ask("Bathrooms:")?,
        });
    }

    Ok(raw)
}

fn ask(message: &str) -> Result<String> {
    Text::new(message).prompt().context("Estimate cancelled")
}
