use serde::Serialize;

use super::factors::YieldFactors;

/// Rounded per-acre and whole-field yields in quintals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComposedYield {
    pub yield_per_acre: f64,
    pub total_yield: f64,
}

/// Apply the factors to the baseline and scale to the field.
///
/// Only the two outputs are rounded; `f64::round` rounds half away from zero.
pub fn compose(baseline: f64, factors: &YieldFactors, area_in_acres: f64) -> ComposedYield {
    let yield_per_acre = (baseline * factors.product()).round();
    let total_yield = (yield_per_acre * area_in_acres).round();

    ComposedYield {
        yield_per_acre,
        total_yield,
    }
}
