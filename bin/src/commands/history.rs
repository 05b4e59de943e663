//! History command implementation.

use crate::display::print_history;
use anyhow::Result;
use sangkat_lib::prelude::*;
use std::path::Path;

/// Show up to `limit` recent searches, newest first.
pub(crate) fn history(limit: usize, db: Option<&Path>) -> Result<()> {
    let store = super::open_history(db)?;
    let records = store.recent(limit)?;

    if records.is_empty() {
        println!("No searches yet.");
        return Ok(());
    }

    print_history(&records);
    Ok(())
}
