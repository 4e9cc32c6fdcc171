use crate::infra::{AppState, Pipeline};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use enrollment::age_groups::age_group_router;
use enrollment::enrollments::enrollment_router;
use serde_json::json;

/// Core routes under `api_prefix` plus the operational endpoints at the root.
pub(crate) fn api_router(pipeline: &Pipeline, api_prefix: &str) -> Router {
    let core = age_group_router(pipeline.registry.clone())
        .merge(enrollment_router(pipeline.service.clone()));

    let core = if api_prefix.is_empty() {
        core
    } else {
        Router::new().nest(api_prefix, core)
    };

    core.route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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
