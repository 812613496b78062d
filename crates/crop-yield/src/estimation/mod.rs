//! Crop yield estimation.
//!
//! The estimator is a pure function of its input record: area is normalized to
//! acres, a baseline is chosen, four independent factors are multiplied in and
//! a coarse confidence label is attached. Validation, persistence of the last
//! input and the HTTP surface wrap around it but never feed back into the math.

pub mod baseline;
pub mod compose;
pub mod config;
pub mod confidence;
pub mod domain;
pub mod factors;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;
pub mod units;
pub mod validation;

#[cfg(test)]
mod tests;

pub use baseline::{select_baseline, Baseline, BaselineSource};
pub use compose::{compose, ComposedYield};
pub use config::{
    FertilityFactors, FertilizerCurve, ManagementScale, RainfallCurve, YieldModelConfig,
};
pub use confidence::{score_confidence, ConfidenceSignals};
pub use domain::{
    AreaUnit, Confidence, EstimationInput, EstimationResult, SoilFertility, YieldUnit,
};
pub use factors::{FactorComponent, FactorKind, YieldFactors};
pub use import::{FieldImportError, FieldRecordImporter, FieldRowError, ImportedField};
pub use repository::{InputStore, SavedInput, StoreError, DEFAULT_STORAGE_KEY};
pub use router::estimation_router;
pub use service::{EstimationServiceError, YieldEstimationService};
pub use units::{normalize_area_to_acres, ACRES_PER_HECTARE};
pub use validation::{InputValidator, InvalidInput};

use serde::Serialize;

/// Stateless estimator holding the model tables it was configured with.
#[derive(Debug, Clone)]
pub struct YieldEstimator {
    config: YieldModelConfig,
}

impl Default for YieldEstimator {
    fn default() -> Self {
        Self::new(YieldModelConfig::default())
    }
}

impl YieldEstimator {
    pub fn new(config: YieldModelConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &YieldModelConfig {
        &self.config
    }

    pub fn estimate(&self, input: &EstimationInput) -> EstimationResult {
        self.explain(input).result
    }

    /// Estimate plus every intermediate value, for reports and audits.
    pub fn explain(&self, input: &EstimationInput) -> EstimationBreakdown {
        let area_in_acres = normalize_area_to_acres(input.area, input.area_unit);
        let baseline = select_baseline(
            &self.config,
            &input.crop,
            input.previous_yield_qtl_per_acre,
        );
        let factors = YieldFactors::compute(&self.config, input);
        let composed = compose(baseline.qtl_per_acre, &factors, area_in_acres);
        let signals = ConfidenceSignals::collect(&self.config, input);

        let result = EstimationResult {
            yield_per_acre: composed.yield_per_acre,
            total_yield: composed.total_yield,
            unit: YieldUnit::Quintals,
            rationale: rationale(input, &baseline, area_in_acres),
            confidence: signals.confidence(),
        };

        EstimationBreakdown {
            area_in_acres,
            components: factors.components(input),
            baseline,
            factors,
            signals,
            result,
        }
    }
}

/// Intermediate values behind one estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationBreakdown {
    pub area_in_acres: f64,
    pub baseline: Baseline,
    pub factors: YieldFactors,
    pub components: Vec<FactorComponent>,
    pub signals: ConfidenceSignals,
    pub result: EstimationResult,
}

fn rationale(input: &EstimationInput, baseline: &Baseline, area_in_acres: f64) -> String {
    let baseline_note = match &baseline.source {
        BaselineSource::History => format!(
            "your previous yield of {:.1} qtl/acre",
            baseline.qtl_per_acre
        ),
        BaselineSource::CropTable { crop } => format!(
            "the regional {crop} baseline of {:.1} qtl/acre",
            baseline.qtl_per_acre
        ),
        BaselineSource::Default => format!(
            "a generic baseline of {:.1} qtl/acre",
            baseline.qtl_per_acre
        ),
    };

    format!(
        "Estimate for {} on {:.2} acres based on {}, adjusted for {} soil fertility, \
         {:.0} mm rainfall, {:.0} kg/acre fertilizer and a management score of {}/10.",
        input.crop.trim(),
        area_in_acres,
        baseline_note,
        input.soil_fertility.label(),
        input.rainfall_mm,
        input.fertilizer_rate_kg_per_acre,
        input.management_score,
    )
}
