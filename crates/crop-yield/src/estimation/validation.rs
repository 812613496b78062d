use super::config::ManagementScale;
use super::domain::EstimationInput;
use super::units::normalize_area_to_acres;

/// Reasons an input record is refused before it reaches the estimator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("crop name is required")]
    MissingCrop,
    #[error("area must be a positive number (found {0})")]
    NonPositiveArea(f64),
    #[error("{field} must be a non-negative number (found {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("management score must be between {min} and {max} (found {found})")]
    ManagementScoreOutOfRange { min: u8, max: u8, found: u8 },
    #[error("{field} exceeds the supported maximum of {max} (found {value})")]
    ExceedsLimit {
        field: &'static str,
        value: f64,
        max: f64,
    },
}

/// Boundary check run on every record before estimation.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputValidator;

impl InputValidator {
    /// Largest field accepted, in acres after unit conversion.
    pub const MAX_AREA_ACRES: f64 = 1.0e9;
    /// Largest previous-season yield accepted, in quintals per acre.
    pub const MAX_PREVIOUS_YIELD_QTL_PER_ACRE: f64 = 1.0e4;

    /// Return a cleaned copy of the input, or the first rule it breaks.
    pub fn validate(&self, input: EstimationInput) -> Result<EstimationInput, InvalidInput> {
        let crop = input.crop.trim();
        if crop.is_empty() {
            return Err(InvalidInput::MissingCrop);
        }

        if !(input.area.is_finite() && input.area > 0.0) {
            return Err(InvalidInput::NonPositiveArea(input.area));
        }

        for (field, value) in [
            ("rainfallMm", input.rainfall_mm),
            ("fertilizerRateKgPerAcre", input.fertilizer_rate_kg_per_acre),
            ("previousYieldQtlPerAcre", input.previous_yield_qtl_per_acre),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(InvalidInput::Negative { field, value });
            }
        }

        let area_in_acres = normalize_area_to_acres(input.area, input.area_unit);
        if !(area_in_acres <= Self::MAX_AREA_ACRES) {
            return Err(InvalidInput::ExceedsLimit {
                field: "areaInAcres",
                value: area_in_acres,
                max: Self::MAX_AREA_ACRES,
            });
        }

        if input.previous_yield_qtl_per_acre > Self::MAX_PREVIOUS_YIELD_QTL_PER_ACRE {
            return Err(InvalidInput::ExceedsLimit {
                field: "previousYieldQtlPerAcre",
                value: input.previous_yield_qtl_per_acre,
                max: Self::MAX_PREVIOUS_YIELD_QTL_PER_ACRE,
            });
        }

        if !(ManagementScale::MIN_SCORE..=ManagementScale::MAX_SCORE)
            .contains(&input.management_score)
        {
            return Err(InvalidInput::ManagementScoreOutOfRange {
                min: ManagementScale::MIN_SCORE,
                max: ManagementScale::MAX_SCORE,
                found: input.management_score,
            });
        }

        Ok(EstimationInput {
            crop: crop.to_string(),
            ..input
        })
    }
}
