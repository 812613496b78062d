use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::estimation::repository::{InputStore, SavedInput, StoreError};
use crate::estimation::{
    AreaUnit, EstimationInput, SoilFertility, YieldEstimationService, YieldEstimator,
};

pub(super) fn wheat_input() -> EstimationInput {
    EstimationInput {
        crop: "Wheat".to_string(),
        area: 1.0,
        area_unit: AreaUnit::Acres,
        soil_fertility: SoilFertility::Medium,
        rainfall_mm: 750.0,
        fertilizer_rate_kg_per_acre: 100.0,
        previous_yield_qtl_per_acre: 18.0,
        management_score: 6,
    }
}

pub(super) fn unknown_crop_input() -> EstimationInput {
    EstimationInput {
        crop: "Quinoa".to_string(),
        area: 1.0,
        area_unit: AreaUnit::Acres,
        soil_fertility: SoilFertility::Low,
        rainfall_mm: 0.0,
        fertilizer_rate_kg_per_acre: 0.0,
        previous_yield_qtl_per_acre: 0.0,
        management_score: 1,
    }
}

pub(super) fn estimator() -> YieldEstimator {
    YieldEstimator::default()
}

pub(super) fn build_service() -> (YieldEstimationService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = YieldEstimationService::new(store.clone(), estimator());
    (service, store)
}

#[derive(Default)]
pub(super) struct MemoryStore {
    entries: Mutex<HashMap<String, SavedInput>>,
}

impl MemoryStore {
    pub(super) fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

impl InputStore for MemoryStore {
    fn save(&self, key: &str, saved: SavedInput) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_string(), saved);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<SavedInput>, StoreError> {
        Ok(self
            .entries
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned())
    }
}

pub(super) struct UnavailableStore;

impl InputStore for UnavailableStore {
    fn save(&self, _key: &str, _saved: SavedInput) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    fn load(&self, _key: &str) -> Result<Option<SavedInput>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
