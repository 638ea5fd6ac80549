use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use konastone::catalog::{catalog_router, CatalogSource};
use konastone::leads::{lead_router, LeadRepository, LeadService};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Catalog, pricing and lead endpoints plus the operational probes.
pub(crate) fn storefront_routes<R, C>(catalog: Arc<C>, leads: Arc<LeadService<R, C>>) -> Router
where
    R: LeadRepository + 'static,
    C: CatalogSource + 'static,
{
    catalog_router(catalog)
        .merge(lead_router(leads))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.readiness.load(Ordering::Relaxed) {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
