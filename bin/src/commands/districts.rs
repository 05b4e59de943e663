//! Districts command implementation.

use anyhow::Result;
use std::path::Path;

/// List districts with their slug and commune count.
pub(crate) fn list_districts(data_dir: Option<&Path>) -> Result<()> {
    let catalog = super::load_catalog(data_dir)?;

    println!("{:<20} {:<20} {:>8}", "DISTRICT", "SLUG", "COMMUNES");
    println!("{}", "-".repeat(50));

    for district in catalog.list_districts() {
        println!(
            "{:<20} {:<20} {:>8}",
            district.name(),
            district.slug(),
            catalog.communes_in(district.slug()).len()
        );
    }

    println!(
        "\nTotal: {} districts, {} communes",
        catalog.district_count(),
        catalog.commune_count()
    );
    Ok(())
}
