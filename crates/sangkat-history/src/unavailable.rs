//! Stand-in history for a store that could not be opened.

use std::path::{Path, PathBuf};

use sangkat_types::EstimationResult;

use crate::{RecordId, SearchHistory, SearchHistoryRecord, StoreError};

/// A history that rejects every operation with [`StoreError::Unavailable`].
///
/// Lets estimates run when the database cannot be opened; the pipeline
/// logs each failed recording and carries on.
#[derive(Debug, Clone)]
pub struct UnavailableHistory {
    path: PathBuf,
    reason: String,
}

impl UnavailableHistory {
    /// Creates a stand-in for the store at `path` that failed to open.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, error: &StoreError) -> Self {
        Self {
            path: path.into(),
            reason: error.to_string(),
        }
    }

    /// Returns the path of the store that failed to open.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self) -> StoreError {
        StoreError::Unavailable {
            path: self.path.clone(),
            reason: self.reason.clone(),
        }
    }
}

impl SearchHistory for UnavailableHistory {
    fn record(&self, _result: &EstimationResult) -> Result<RecordId, StoreError> {
        Err(self.error())
    }

    fn recent(&self, _limit: usize) -> Result<Vec<SearchHistoryRecord>, StoreError> {
        Err(self.error())
    }

    fn by_id(&self, _id: RecordId) -> Result<Option<SearchHistoryRecord>, StoreError> {
        Err(self.error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DATABASE_FILE, SqliteHistory};
    use sangkat_types::{Money, PropertyType};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_every_operation_reports_open_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join(DATABASE_FILE);

        let error = SqliteHistory::open(&path).unwrap_err();
        let history = UnavailableHistory::new(&path, &error);
        assert_eq!(history.path(), path);

        let result = EstimationResult {
            property_type: PropertyType::Land,
            district: "Daun Penh".to_string(),
            commune: "Chakto Mukh".to_string(),
            price: Money::new(240_000.0).unwrap(),
            size_sqm: 300.0,
            bedrooms: 0,
            bathrooms: 0,
        };

        match history.record(&result) {
            Err(StoreError::Unavailable { path: bad, reason }) => {
                assert_eq!(bad, path);
                assert_eq!(reason, error.to_string());
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
        assert!(matches!(
            history.recent(10),
            Err(StoreError::Unavailable { .. })
        ));
        assert!(matches!(
            history.by_id(1),
            Err(StoreError::Unavailable { .. })
        ));
    }
}
