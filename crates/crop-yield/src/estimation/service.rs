use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{EstimationInput, EstimationResult};
use super::repository::{InputStore, SavedInput, StoreError, DEFAULT_STORAGE_KEY};
use super::validation::{InputValidator, InvalidInput};
use super::{EstimationBreakdown, YieldEstimator};

/// Service composing the validation boundary, the estimator, and input caching.
pub struct YieldEstimationService<S> {
    validator: InputValidator,
    estimator: Arc<YieldEstimator>,
    store: Arc<S>,
    storage_key: String,
}

impl<S> YieldEstimationService<S>
where
    S: InputStore + 'static,
{
    pub fn new(store: Arc<S>, estimator: YieldEstimator) -> Self {
        Self::with_storage_key(store, estimator, DEFAULT_STORAGE_KEY)
    }

    pub fn with_storage_key(
        store: Arc<S>,
        estimator: YieldEstimator,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            validator: InputValidator,
            estimator: Arc::new(estimator),
            store,
            storage_key: storage_key.into(),
        }
    }

    pub fn estimator(&self) -> &YieldEstimator {
        &self.estimator
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Validate, estimate, and remember the input for the next visit.
    ///
    /// A failed save is logged and does not fail the estimate.
    pub fn estimate(
        &self,
        input: EstimationInput,
    ) -> Result<EstimationResult, EstimationServiceError> {
        Ok(self.explain(input)?.result)
    }

    /// Same as [`estimate`](Self::estimate) but keeps the factor breakdown.
    pub fn explain(
        &self,
        input: EstimationInput,
    ) -> Result<EstimationBreakdown, EstimationServiceError> {
        let input = self.validator.validate(input).map_err(|err| {
            warn!(error = %err, "rejected yield estimation input");
            err
        })?;

        let breakdown = self.estimator.explain(&input);
        info!(
            crop = %input.crop,
            yield_per_acre = breakdown.result.yield_per_acre,
            total_yield = breakdown.result.total_yield,
            confidence = breakdown.result.confidence.label(),
            "yield estimate computed"
        );

        let saved = SavedInput {
            input,
            saved_at: Utc::now(),
        };
        if let Err(err) = self.store.save(&self.storage_key, saved) {
            warn!(error = %err, key = %self.storage_key, "failed to cache estimation input");
        }

        Ok(breakdown)
    }

    /// Most recently cached input, if any.
    pub fn last_input(&self) -> Result<Option<SavedInput>, EstimationServiceError> {
        Ok(self.store.load(&self.storage_key)?)
    }
}

/// Error raised by the estimation service.
#[derive(Debug, thiserror::Error)]
pub enum EstimationServiceError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error(transparent)]
    Store(#[from] StoreError),
}
