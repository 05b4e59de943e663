//! Display utilities for the sangkat CLI.

use sangkat_lib::prelude::*;

/// Print the result card of an estimate.
pub(crate) fn print_result(result: &EstimationResult) {
    println!("Estimated price: {}", result.price);
    println!();
    println!("Property type:   {}", result.property_type);
    println!("District:        {}", result.district);
    println!("Commune:         {}", result.commune);
    println!("Size:            {} sqm", result.size_sqm);
    if result.property_type.has_rooms() {
        println!("Bedrooms:        {}", result.bedrooms);
        println!("Bathrooms:       {}", result.bathrooms);
    }
}

/// Print search history records as a table.
pub(crate) fn print_history(records: &[SearchHistoryRecord]) {
    println!(
        "{:>5} {:<16} {:<18} {:<22} {:>14} {:>10} {:>5} {:>5}",
        "ID", "TYPE", "DISTRICT", "COMMUNE", "PRICE", "SIZE", "BEDS", "BATHS"
    );
    println!("{}", "-".repeat(102));

    for record in records {
        let result = &record.result;
        println!(
            "{:>5} {:<16} {:<18} {:<22} {:>14} {:>10} {:>5} {:>5}",
            record.id,
            result.property_type.label(),
            result.district,
            result.commune,
            result.price.to_string(),
            result.size_sqm,
            result.bedrooms,
            result.bathrooms
        );
    }

    println!("\nShowing {} searches", records.len());
}
