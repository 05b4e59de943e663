//! The estimation pipeline.

use sangkat_history::{RecordId, SearchHistory, SearchHistoryRecord};
use sangkat_model::PricePredictor;
use sangkat_types::{EstimationRequest, EstimationResult, LocationResolver, RawEstimationInput};

use crate::Result;

/// A completed estimate and where it was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// The estimate to display.
    pub result: EstimationResult,
    /// History id, or `None` if recording failed.
    pub record_id: Option<RecordId>,
}

/// Runs estimation requests against borrowed, long-lived dependencies.
pub struct EstimationPipeline<'a> {
    locations: &'a dyn LocationResolver,
    predictor: &'a PricePredictor,
    history: &'a dyn SearchHistory,
}

impl std::fmt::Debug for EstimationPipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EstimationPipeline")
            .field("predictor", self.predictor)
            .finish_non_exhaustive()
    }
}

impl<'a> EstimationPipeline<'a> {
    /// Creates a pipeline over the reference data, price models and history.
    #[must_use]
    pub const fn new(
        locations: &'a dyn LocationResolver,
        predictor: &'a PricePredictor,
        history: &'a dyn SearchHistory,
    ) -> Self {
        Self {
            locations,
            predictor,
            history,
        }
    }

    /// Runs one submission through validation, prediction and recording.
    ///
    /// Recording is best effort: a history failure is logged and the
    /// estimate is still returned, with `record_id` set to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Validation`] if the input is rejected and
    /// [`PipelineError::PredictionFailed`] if the model cannot produce a
    /// price. Nothing is recorded in either case.
    ///
    /// [`PipelineError::Validation`]: crate::PipelineError::Validation
    /// [`PipelineError::PredictionFailed`]: crate::PipelineError::PredictionFailed
    pub fn run(&self, raw: &RawEstimationInput) -> Result<Estimate> {
        let request = EstimationRequest::validate(raw, self.locations)?;
        log::debug!(
            "Validated {} request for {} / {} at {}",
            request.property_type(),
            request.district(),
            request.commune(),
            request.coordinates()
        );

        let price = self.predictor.estimate(&request)?;
        let result = EstimationResult::from_request(&request, price);

        let record_id = match self.history.record(&result) {
            Ok(id) => {
                log::info!("Recorded search {id}: {} {}", result.property_type, price);
                Some(id)
            }
            Err(e) => {
                log::warn!("Estimate not saved to history: {e}");
                None
            }
        };

        Ok(Estimate { result, record_id })
    }

    /// Returns up to `limit` past searches, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::History`](crate::PipelineError::History) if
    /// the history cannot be read.
    pub fn recent(&self, limit: usize) -> Result<Vec<SearchHistoryRecord>> {
        Ok(self.history.recent(limit)?)
    }

    /// Returns a past search by id, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::History`](crate::PipelineError::History) if
    /// the history cannot be read.
    pub fn show(&self, id: RecordId) -> Result<Option<SearchHistoryRecord>> {
        Ok(self.history.by_id(id)?)
    }
}
