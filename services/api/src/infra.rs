use crop_yield::estimation::{AreaUnit, InputStore, SavedInput, SoilFertility, StoreError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stand-in for the browser key-value store.
#[derive(Default, Clone)]
pub(crate) struct InMemoryInputStore {
    entries: Arc<Mutex<HashMap<String, SavedInput>>>,
}

impl InputStore for InMemoryInputStore {
    fn save(&self, key: &str, saved: SavedInput) -> Result<(), StoreError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("input store mutex poisoned".to_string()))?;
        guard.insert(key.to_string(), saved);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<SavedInput>, StoreError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("input store mutex poisoned".to_string()))?;
        Ok(guard.get(key).cloned())
    }
}

pub(crate) fn parse_area_unit(raw: &str) -> Result<AreaUnit, String> {
    AreaUnit::parse(raw).ok_or_else(|| format!("'{raw}' is not a known area unit (acres, hectares)"))
}

pub(crate) fn parse_soil_fertility(raw: &str) -> Result<SoilFertility, String> {
    SoilFertility::parse(raw)
        .ok_or_else(|| format!("'{raw}' is not a known soil fertility (low, medium, high)"))
}
