//! CLI command implementations.

pub(crate) mod communes;
pub(crate) mod districts;
pub(crate) mod estimate;
pub(crate) mod history;
pub(crate) mod show;

use anyhow::{Context, Result};
use sangkat_lib::UnavailableHistory;
use sangkat_lib::prelude::*;
use std::path::{Path, PathBuf};

/// Loads reference data from `data_dir`, or the bundled data when absent.
pub(crate) fn load_catalog(data_dir: Option<&Path>) -> Result<ReferenceCatalog> {
    data_dir.map_or_else(
        || ReferenceCatalog::embedded().context("Bundled reference data is invalid"),
        |dir| {
            ReferenceCatalog::load_dir(dir)
                .with_context(|| format!("Failed to load reference data from {}", dir.display()))
        },
    )
}

fn history_path(db: Option<&Path>) -> PathBuf {
    db.map_or_else(SqliteHistory::default_path, Path::to_path_buf)
}

/// Opens the search history at `db`, or at the default location.
pub(crate) fn open_history(db: Option<&Path>) -> Result<SqliteHistory> {
    let path = history_path(db);
    SqliteHistory::open(&path)
        .with_context(|| format!("Failed to open search history at {}", path.display()))
}

/// Opens the search history for recording estimates.
///
/// A store that cannot be opened is replaced by an [`UnavailableHistory`],
/// so estimating still works and only recording is lost.
pub(crate) fn open_history_for_recording(db: Option<&Path>) -> Box<dyn SearchHistory> {
    let path = history_path(db);
    match SqliteHistory::open(&path) {
        Ok(history) => Box::new(history),
        Err(e) => {
            log::warn!("Search history disabled: {e}");
            Box::new(UnavailableHistory::new(path, &e))
        }
    }
}
