use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::EstimationInput;
use super::repository::InputStore;
use super::service::{EstimationServiceError, YieldEstimationService};

/// Router builder exposing the estimation endpoints.
pub fn estimation_router<S>(service: Arc<YieldEstimationService<S>>) -> Router
where
    S: InputStore + 'static,
{
    Router::new()
        .route("/api/v1/yield/estimate", post(estimate_handler::<S>))
        .route("/api/v1/yield/last-input", get(last_input_handler::<S>))
        .route("/api/v1/yield/crops", get(crops_handler::<S>))
        .with_state(service)
}

/// Crop picker payload: table entries plus the fallback for anything else.
#[derive(Debug, Clone, Serialize)]
pub struct CropCatalogView {
    pub crops: BTreeMap<String, f64>,
    pub default_baseline: f64,
    pub unit: &'static str,
}

pub(crate) async fn estimate_handler<S>(
    State(service): State<Arc<YieldEstimationService<S>>>,
    axum::Json(input): axum::Json<EstimationInput>,
) -> Response
where
    S: InputStore + 'static,
{
    match service.estimate(input) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(EstimationServiceError::InvalidInput(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn last_input_handler<S>(
    State(service): State<Arc<YieldEstimationService<S>>>,
) -> Response
where
    S: InputStore + 'static,
{
    match service.last_input() {
        Ok(Some(saved)) => (StatusCode::OK, axum::Json(saved)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": "no saved input",
                "key": service.storage_key(),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn crops_handler<S>(
    State(service): State<Arc<YieldEstimationService<S>>>,
) -> axum::Json<CropCatalogView>
where
    S: InputStore + 'static,
{
    let config = service.estimator().config();
    axum::Json(CropCatalogView {
        crops: config.crop_baselines.clone(),
        default_baseline: config.default_baseline,
        unit: "quintals/acre",
    })
}
