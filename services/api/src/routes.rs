use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use crop_yield::estimation::{estimation_router, InputStore, YieldEstimationService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_estimation_routes<S>(service: Arc<YieldEstimationService<S>>) -> axum::Router
where
    S: InputStore + 'static,
{
    estimation_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryInputStore;
    use axum::body::Body;
    use axum::http::Request;
    use crop_yield::estimation::YieldEstimator;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let service = Arc::new(YieldEstimationService::new(
            Arc::new(InMemoryInputStore::default()),
            YieldEstimator::default(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_estimation_routes(service).layer(Extension(state))
    }

    async fn status_of(router: axum::Router, request: Request<Body>) -> StatusCode {
        router
            .oneshot(request)
            .await
            .expect("route executes")
            .status()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let request = Request::get("/health")
            .body(Body::empty())
            .expect("request builds");
        assert_eq!(status_of(app(true), request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_tracks_startup_flag() {
        let request = Request::get("/ready")
            .body(Body::empty())
            .expect("request builds");
        assert_eq!(
            status_of(app(false), request).await,
            StatusCode::SERVICE_UNAVAILABLE
        );

        let request = Request::get("/ready")
            .body(Body::empty())
            .expect("request builds");
        assert_eq!(status_of(app(true), request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn estimation_routes_are_mounted() {
        let body = json!({
            "crop": "Quinoa",
            "area": 1.0,
            "areaUnit": "acres",
            "soilFertility": "low",
            "rainfallMm": 0.0,
            "fertilizerRateKgPerAcre": 0.0,
            "previousYieldQtlPerAcre": 0.0,
            "managementScore": 1
        });
        let request = Request::post("/api/v1/yield/estimate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
            .expect("request builds");

        let response = app(true).oneshot(request).await.expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json payload");
        assert_eq!(payload["yieldPerAcre"], 7.0);
        assert_eq!(payload["confidence"], "Low");
    }
}
