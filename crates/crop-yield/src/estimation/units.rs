use super::domain::AreaUnit;

/// Acres in one hectare.
pub const ACRES_PER_HECTARE: f64 = 2.47105;

/// Convert a reported field area into acres.
pub fn normalize_area_to_acres(area: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::Acres => area,
        AreaUnit::Hectares => area * ACRES_PER_HECTARE,
    }
}
