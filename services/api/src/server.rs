use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryInputStore};
use crate::routes::with_estimation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use crop_yield::config::AppConfig;
use crop_yield::error::AppError;
use crop_yield::estimation::{YieldEstimationService, YieldEstimator};
use crop_yield::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let model = config.yield_model()?;
    info!(
        crops = model.crop_baselines.len(),
        custom_model = config.estimation.model_path.is_some(),
        "yield model loaded"
    );
    let store = Arc::new(InMemoryInputStore::default());
    let estimation_service = Arc::new(YieldEstimationService::with_storage_key(
        store,
        YieldEstimator::new(model),
        config.estimation.storage_key.clone(),
    ));

    let app = with_estimation_routes(estimation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "crop yield estimator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
