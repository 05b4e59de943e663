//! Show command implementation.

use crate::display::print_result;
use anyhow::{Result, bail};
use sangkat_lib::prelude::*;
use std::path::Path;

/// Show the result card of a past search.
pub(crate) fn show(id: RecordId, db: Option<&Path>) -> Result<()> {
    let store = super::open_history(db)?;
    let Some(record) = store.by_id(id)? else {
        bail!("Search #{id} not found");
    };

    println!("Search #{}\n", record.id);
    print_result(&record.result);
    Ok(())
}
