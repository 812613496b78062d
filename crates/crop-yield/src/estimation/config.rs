use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::SoilFertility;

const DEFAULT_BASELINE_QTL_PER_ACRE: f64 = 15.0;

/// Tunable tables and curve constants backing the yield model.
///
/// `Default` carries the stock regional values. Deployments can override any
/// part of it from JSON; missing sections keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldModelConfig {
    /// Quintals per acre keyed by lower-cased crop name.
    pub crop_baselines: BTreeMap<String, f64>,
    /// Baseline applied when the crop is not in the table.
    pub default_baseline: f64,
    pub fertility: FertilityFactors,
    pub rainfall: RainfallCurve,
    pub fertilizer: FertilizerCurve,
    pub management: ManagementScale,
}

impl Default for YieldModelConfig {
    fn default() -> Self {
        let crop_baselines = [
            ("wheat", 18.0),
            ("rice", 22.0),
            ("maize", 25.0),
            ("cotton", 8.0),
            ("soybean", 12.0),
        ]
        .into_iter()
        .map(|(crop, baseline)| (crop.to_string(), baseline))
        .collect();

        Self {
            crop_baselines,
            default_baseline: DEFAULT_BASELINE_QTL_PER_ACRE,
            fertility: FertilityFactors::default(),
            rainfall: RainfallCurve::default(),
            fertilizer: FertilizerCurve::default(),
            management: ManagementScale::default(),
        }
    }
}

impl YieldModelConfig {
    /// Baseline for a crop name, matched case-insensitively after trimming.
    pub fn baseline_for(&self, crop: &str) -> Option<f64> {
        self.crop_baselines.get(&normalize_crop(crop)).copied()
    }

    pub fn is_known_crop(&self, crop: &str) -> bool {
        self.baseline_for(crop).is_some()
    }

    /// Normalize crop keys and replace unusable tuning values with defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();

        let crop_baselines = self
            .crop_baselines
            .into_iter()
            .filter(|(crop, baseline)| !crop.trim().is_empty() && positive(*baseline))
            .map(|(crop, baseline)| (normalize_crop(&crop), baseline))
            .collect();

        Self {
            crop_baselines,
            default_baseline: or_default(self.default_baseline, defaults.default_baseline),
            fertility: self.fertility.sanitized(defaults.fertility),
            rainfall: self.rainfall.sanitized(defaults.rainfall),
            fertilizer: self.fertilizer.sanitized(defaults.fertilizer),
            management: self.management.sanitized(defaults.management),
        }
    }
}

/// Discrete multipliers per soil fertility class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FertilityFactors {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for FertilityFactors {
    fn default() -> Self {
        Self {
            low: 0.9,
            medium: 1.0,
            high: 1.15,
        }
    }
}

impl FertilityFactors {
    pub fn for_class(&self, fertility: SoilFertility) -> f64 {
        match fertility {
            SoilFertility::Low => self.low,
            SoilFertility::Medium => self.medium,
            SoilFertility::High => self.high,
        }
    }

    fn sanitized(self, defaults: Self) -> Self {
        Self {
            low: or_default(self.low, defaults.low),
            medium: or_default(self.medium, defaults.medium),
            high: or_default(self.high, defaults.high),
        }
    }
}

/// Symmetric penalty around an optimum seasonal rainfall.
///
/// `factor = max(floor, 1 - slope * |rainfall - optimum| / spread)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainfallCurve {
    pub optimum_mm: f64,
    pub spread_mm: f64,
    pub slope: f64,
    pub floor: f64,
}

impl Default for RainfallCurve {
    fn default() -> Self {
        Self {
            optimum_mm: 750.0,
            spread_mm: 300.0,
            slope: 0.2,
            floor: 0.75,
        }
    }
}

impl RainfallCurve {
    /// Whether rainfall sits strictly inside the modelled optimum band.
    pub fn within_band(&self, rainfall_mm: f64) -> bool {
        (rainfall_mm - self.optimum_mm).abs() < self.spread_mm
    }

    fn sanitized(self, defaults: Self) -> Self {
        let floor = if self.floor.is_finite() && self.floor > 0.0 && self.floor <= 1.0 {
            self.floor
        } else {
            defaults.floor
        };

        Self {
            optimum_mm: or_default(self.optimum_mm, defaults.optimum_mm),
            spread_mm: or_default(self.spread_mm, defaults.spread_mm),
            slope: or_default(self.slope, defaults.slope),
            floor,
        }
    }
}

/// Diminishing-returns response to fertilizer up to a reference rate.
///
/// `factor = min(cap, base + span * min(1, rate / reference_rate))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FertilizerCurve {
    pub reference_rate_kg_per_acre: f64,
    pub base: f64,
    pub span: f64,
    pub cap: f64,
}

impl Default for FertilizerCurve {
    fn default() -> Self {
        Self {
            reference_rate_kg_per_acre: 100.0,
            base: 0.8,
            span: 0.4,
            cap: 1.2,
        }
    }
}

impl FertilizerCurve {
    fn sanitized(self, defaults: Self) -> Self {
        let base = or_default(self.base, defaults.base);
        let cap = or_default(self.cap, defaults.cap).max(base);

        Self {
            reference_rate_kg_per_acre: or_default(
                self.reference_rate_kg_per_acre,
                defaults.reference_rate_kg_per_acre,
            ),
            base,
            span: if self.span.is_finite() && self.span >= 0.0 {
                self.span
            } else {
                defaults.span
            },
            cap,
        }
    }
}

/// Linear mapping from the 1-10 management score onto a multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagementScale {
    pub min_factor: f64,
    pub max_factor: f64,
}

impl Default for ManagementScale {
    fn default() -> Self {
        Self {
            min_factor: 0.85,
            max_factor: 1.2,
        }
    }
}

impl ManagementScale {
    pub const MIN_SCORE: u8 = 1;
    pub const MAX_SCORE: u8 = 10;

    fn sanitized(self, defaults: Self) -> Self {
        let min_factor = or_default(self.min_factor, defaults.min_factor);
        let max_factor = or_default(self.max_factor, defaults.max_factor).max(min_factor);
        Self {
            min_factor,
            max_factor,
        }
    }
}

pub(crate) fn normalize_crop(crop: &str) -> String {
    crop.trim().to_lowercase()
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn or_default(value: f64, fallback: f64) -> f64 {
    if positive(value) {
        value
    } else {
        fallback
    }
}
