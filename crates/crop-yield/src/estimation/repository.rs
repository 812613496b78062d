use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::EstimationInput;

/// Namespaced key the form pre-fill reads back on return visits.
pub const DEFAULT_STORAGE_KEY: &str = "agri-assist:yield-estimator:last-input";

/// Last submitted input kept so the form can be pre-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedInput {
    pub input: EstimationInput,
    pub saved_at: DateTime<Utc>,
}

/// Key-value storage for cached inputs, so the service can be exercised in isolation.
pub trait InputStore: Send + Sync {
    fn save(&self, key: &str, saved: SavedInput) -> Result<(), StoreError>;
    fn load(&self, key: &str) -> Result<Option<SavedInput>, StoreError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("stored input is unreadable: {0}")]
    Corrupt(String),
    #[error("input store unavailable: {0}")]
    Unavailable(String),
}
