use serde::{Deserialize, Serialize};

/// Unit the grower reported the field area in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    Acres,
    Hectares,
}

impl AreaUnit {
    pub fn label(&self) -> &'static str {
        match self {
            AreaUnit::Acres => "acres",
            AreaUnit::Hectares => "hectares",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "acre" | "acres" | "ac" => Some(Self::Acres),
            "hectare" | "hectares" | "ha" => Some(Self::Hectares),
            _ => None,
        }
    }
}

/// Coarse soil fertility rating captured on the estimation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilFertility {
    Low,
    Medium,
    High,
}

impl SoilFertility {
    pub fn label(&self) -> &'static str {
        match self {
            SoilFertility::Low => "low",
            SoilFertility::Medium => "medium",
            SoilFertility::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Field characteristics submitted for a yield estimate.
///
/// Values are expected to have passed [`InputValidator`](super::InputValidator)
/// before reaching the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationInput {
    pub crop: String,
    pub area: f64,
    pub area_unit: AreaUnit,
    pub soil_fertility: SoilFertility,
    pub rainfall_mm: f64,
    pub fertilizer_rate_kg_per_acre: f64,
    /// `0.0` means the grower has no history and the crop baseline applies.
    pub previous_yield_qtl_per_acre: f64,
    pub management_score: u8,
}

/// Reporting unit for every yield figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YieldUnit {
    Quintals,
}

/// Three-level indicator of how much of an estimate rests on verified inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }
}

/// Estimate returned to the form layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    pub yield_per_acre: f64,
    pub total_yield: f64,
    pub unit: YieldUnit,
    pub rationale: String,
    pub confidence: Confidence,
}
