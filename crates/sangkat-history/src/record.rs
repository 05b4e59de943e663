//! History records and the storage interface.

use sangkat_types::EstimationResult;

use crate::StoreError;

/// Surrogate identifier of a history row.
pub type RecordId = i64;

/// Number of searches shown in the recent-searches list.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// A stored estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHistoryRecord {
    /// Row id, increasing with insertion order.
    pub id: RecordId,
    /// The stored estimate.
    pub result: EstimationResult,
}

/// Append-only storage for completed estimates.
pub trait SearchHistory {
    /// Appends an estimate and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the estimate cannot be written.
    fn record(&self, result: &EstimationResult) -> Result<RecordId, StoreError>;

    /// Returns up to `limit` records, most recently inserted first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn recent(&self, limit: usize) -> Result<Vec<SearchHistoryRecord>, StoreError>;

    /// Returns the record with the given id, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn by_id(&self, id: RecordId) -> Result<Option<SearchHistoryRecord>, StoreError>;
}
