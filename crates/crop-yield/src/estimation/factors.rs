use serde::Serialize;

use super::config::{FertilizerCurve, ManagementScale, RainfallCurve, YieldModelConfig};
use super::domain::{EstimationInput, SoilFertility};

/// The four independent site adjustments applied to a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    SoilFertility,
    Rainfall,
    Fertilizer,
    Management,
}

impl FactorKind {
    pub fn label(&self) -> &'static str {
        match self {
            FactorKind::SoilFertility => "Soil fertility",
            FactorKind::Rainfall => "Rainfall",
            FactorKind::Fertilizer => "Fertilizer",
            FactorKind::Management => "Management",
        }
    }
}

/// Single multiplier with a note describing the input behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorComponent {
    pub factor: FactorKind,
    pub multiplier: f64,
    pub notes: String,
}

/// Multipliers computed for one input record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YieldFactors {
    pub fertility: f64,
    pub rainfall: f64,
    pub fertilizer: f64,
    pub management: f64,
}

impl YieldFactors {
    pub fn compute(config: &YieldModelConfig, input: &EstimationInput) -> Self {
        Self {
            fertility: fertility_factor(config, input.soil_fertility),
            rainfall: rainfall_factor(&config.rainfall, input.rainfall_mm),
            fertilizer: fertilizer_factor(&config.fertilizer, input.fertilizer_rate_kg_per_acre),
            management: management_factor(&config.management, input.management_score),
        }
    }

    /// Factors are independent, so they combine by plain multiplication.
    pub fn product(&self) -> f64 {
        self.fertility * self.rainfall * self.fertilizer * self.management
    }

    pub fn components(&self, input: &EstimationInput) -> Vec<FactorComponent> {
        vec![
            FactorComponent {
                factor: FactorKind::SoilFertility,
                multiplier: self.fertility,
                notes: format!("{} soil fertility", input.soil_fertility.label()),
            },
            FactorComponent {
                factor: FactorKind::Rainfall,
                multiplier: self.rainfall,
                notes: format!("{:.0} mm expected seasonal rainfall", input.rainfall_mm),
            },
            FactorComponent {
                factor: FactorKind::Fertilizer,
                multiplier: self.fertilizer,
                notes: format!(
                    "{:.0} kg/acre fertilizer applied",
                    input.fertilizer_rate_kg_per_acre
                ),
            },
            FactorComponent {
                factor: FactorKind::Management,
                multiplier: self.management,
                notes: format!("management score {}/10", input.management_score),
            },
        ]
    }
}

pub fn fertility_factor(config: &YieldModelConfig, fertility: SoilFertility) -> f64 {
    config.fertility.for_class(fertility)
}

/// Bell-shaped response around the optimum, floored so drought or
/// waterlogging alone never drives the estimate to zero.
pub fn rainfall_factor(curve: &RainfallCurve, rainfall_mm: f64) -> f64 {
    let delta = (rainfall_mm - curve.optimum_mm).abs() / curve.spread_mm;
    (1.0 - curve.slope * delta).max(curve.floor).min(1.0)
}

/// Linear gain up to the reference rate; nothing further is credited past it.
pub fn fertilizer_factor(curve: &FertilizerCurve, rate_kg_per_acre: f64) -> f64 {
    let ratio = (rate_kg_per_acre / curve.reference_rate_kg_per_acre)
        .max(0.0)
        .min(1.0);
    (curve.base + curve.span * ratio).min(curve.cap)
}

pub fn management_factor(scale: &ManagementScale, score: u8) -> f64 {
    let score = score.clamp(ManagementScale::MIN_SCORE, ManagementScale::MAX_SCORE);
    let steps = f64::from(ManagementScale::MAX_SCORE - ManagementScale::MIN_SCORE);
    let step = (scale.max_factor - scale.min_factor) / steps;
    (scale.min_factor + f64::from(score - ManagementScale::MIN_SCORE) * step)
        .min(scale.max_factor)
}
