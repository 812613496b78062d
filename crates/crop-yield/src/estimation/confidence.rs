use serde::Serialize;

use super::config::YieldModelConfig;
use super::domain::{Confidence, EstimationInput};

/// Which inputs counted toward the confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfidenceSignals {
    pub historical_yield: bool,
    pub known_crop: bool,
    pub rainfall_in_band: bool,
}

impl ConfidenceSignals {
    pub fn collect(config: &YieldModelConfig, input: &EstimationInput) -> Self {
        Self {
            historical_yield: input.previous_yield_qtl_per_acre > 0.0,
            known_crop: config.is_known_crop(&input.crop),
            rainfall_in_band: config.rainfall.within_band(input.rainfall_mm),
        }
    }

    pub fn score(&self) -> u8 {
        [self.historical_yield, self.known_crop, self.rainfall_in_band]
            .into_iter()
            .filter(|met| *met)
            .count() as u8
    }

    pub fn confidence(&self) -> Confidence {
        match self.score() {
            0 | 1 => Confidence::Low,
            2 => Confidence::Medium,
            _ => Confidence::High,
        }
    }
}

/// Three-point rule: history supplied, crop in the table, rainfall in band.
pub fn score_confidence(config: &YieldModelConfig, input: &EstimationInput) -> Confidence {
    ConfidenceSignals::collect(config, input).confidence()
}
