use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_tracker_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use jobtrack_ai::config::AppConfig;
use jobtrack_ai::error::AppError;
use jobtrack_ai::telemetry;
use jobtrack_ai::workflows::intake::GeminiProvider;
use jobtrack_ai::workflows::tracker::{JobTrackerService, JsonFileStore};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(data_file) = args.data_file.take() {
        config.storage.data_file = data_file;
    }

    telemetry::init(&config.telemetry)?;

    if config.extraction.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; extraction requests will be rejected");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(JsonFileStore::new(config.storage.data_file.clone()));
    let extractor = Arc::new(GeminiProvider::from_config(&config.extraction));
    let tracker_service = Arc::new(JobTrackerService::new(store, extractor));

    let app = with_tracker_routes(tracker_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        data_file = %config.storage.data_file.display(),
        "job tracker ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
