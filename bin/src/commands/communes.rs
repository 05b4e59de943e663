//! Communes command implementation.

use anyhow::{Context, Result};
use std::path::Path;

/// List the communes of a district, looked up by name or slug.
pub(crate) fn list_communes(district: &str, data_dir: Option<&Path>) -> Result<()> {
    let catalog = super::load_catalog(data_dir)?;
    let region = catalog
        .district_by_name(district)
        .or_else(|| catalog.district(district))
        .with_context(|| format!("Unknown district: {district}"))?;

    let communes = catalog.communes_in(region.slug());
    if communes.is_empty() {
        println!("No communes listed for {region}.");
        return Ok(());
    }

    println!("Communes of {region}:\n");
    println!("{:<25} {:>12} {:>12}", "COMMUNE", "LATITUDE", "LONGITUDE");
    println!("{}", "-".repeat(51));

    for commune in &communes {
        let coords = commune.coordinates();
        println!(
            "{:<25} {:>12.6} {:>12.6}",
            commune.name(),
            coords.latitude,
            coords.longitude
        );
    }

    println!("\nTotal: {} communes", communes.len());
    Ok(())
}
