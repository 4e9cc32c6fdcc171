use crate::cli::ServeArgs;
use crate::infra::{AppState, Pipeline};
use crate::routes::api_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use enrollment::config::AppConfig;
use enrollment::error::AppError;
use enrollment::telemetry;
use std::future::IntoFuture;
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

    let pipeline = Pipeline::in_memory(&config.queue.name);
    let worker = pipeline.worker(config.worker.poll_delay);

    let app = api_router(&pipeline, &config.server.api_prefix)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        queue = %config.queue.name,
        "enrollment service ready"
    );

    // The worker shares the process; if it stops, so does the service.
    let worker_task = tokio::spawn(async move { worker.run().await });
    let server = axum::serve(listener, app).into_future();

    tokio::select! {
        served = server => served?,
        finished = worker_task => finished??,
    }

    Ok(())
}
