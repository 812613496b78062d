use serde::Serialize;

use super::config::{normalize_crop, YieldModelConfig};

/// Where the per-acre baseline came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum BaselineSource {
    /// Grower-supplied yield from a previous season.
    History,
    /// Regional table entry for the named crop.
    CropTable { crop: String },
    /// Crop not in the table.
    Default,
}

/// Resolved baseline yield in quintals per acre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Baseline {
    pub qtl_per_acre: f64,
    #[serde(flatten)]
    pub source: BaselineSource,
}

/// Pick the baseline for a crop, preferring a positive historical yield.
pub fn select_baseline(config: &YieldModelConfig, crop: &str, previous_yield: f64) -> Baseline {
    if previous_yield > 0.0 {
        return Baseline {
            qtl_per_acre: previous_yield,
            source: BaselineSource::History,
        };
    }

    match config.baseline_for(crop) {
        Some(qtl_per_acre) => Baseline {
            qtl_per_acre,
            source: BaselineSource::CropTable {
                crop: normalize_crop(crop),
            },
        },
        None => Baseline {
            qtl_per_acre: config.default_baseline,
            source: BaselineSource::Default,
        },
    }
}
