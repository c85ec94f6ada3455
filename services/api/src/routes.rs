use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;

use inspection_ops::clock::Clock;
use inspection_ops::inspections::inspection_router;
use inspection_ops::properties::property_router;
use inspection_ops::reports::report_router;
use inspection_ops::store::Storage;
use inspection_ops::sundry::sundry_router;

use crate::infra::{AppState, Services};

/// Compose the resource routers with the operational endpoints.
pub(crate) fn api_routes<S, C>(services: &Services<S, C>) -> Router
where
    S: Storage + 'static,
    C: Clock + 'static,
{
    property_router(services.properties.clone())
        .merge(inspection_router(services.inspections.clone()))
        .merge(sundry_router(services.sundry.clone()))
        .merge(report_router(services.reports.clone()))
        .route("/health", get(healthcheck))
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
