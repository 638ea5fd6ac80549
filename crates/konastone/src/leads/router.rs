use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::{
    FinanceApplication, Inquiry, LeadId, LeadStatus, TestDriveBooking, TradeInRequest,
};
use super::repository::{LeadRecord, LeadRepository, RepositoryError};
use super::service::{LeadService, LeadServiceError};
use crate::catalog::CatalogSource;

/// Router builder exposing the storefront lead-capture forms.
pub fn lead_router<R, C>(service: Arc<LeadService<R, C>>) -> Router
where
    R: LeadRepository + 'static,
    C: CatalogSource + 'static,
{
    Router::new()
        .route("/api/v1/leads/test-drives", post(test_drive_handler::<R, C>))
        .route("/api/v1/leads/trade-ins", post(trade_in_handler::<R, C>))
        .route(
            "/api/v1/leads/finance-applications",
            post(finance_handler::<R, C>),
        )
        .route("/api/v1/leads/inquiries", post(inquiry_handler::<R, C>))
        .route("/api/v1/leads/:lead_id", get(status_handler::<R, C>))
        .route(
            "/api/v1/leads/:lead_id/status",
            put(status_update_handler::<R, C>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: LeadStatus,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) async fn test_drive_handler<R, C>(
    State(service): State<Arc<LeadService<R, C>>>,
    Json(booking): Json<TestDriveBooking>,
) -> Response
where
    R: LeadRepository + 'static,
    C: CatalogSource + 'static,
{
    accepted(service.submit_test_drive(booking, today()))
}

pub(crate) async fn trade_in_handler<R, C>(
    State(service): State<Arc<LeadService<R, C>>>,
    Json(request): Json<TradeInRequest>,
) -> Response
where
    R: LeadRepository + 'static,
    C: CatalogSource + 'static,
{
    accepted(service.submit_trade_in(request, today()))
}

pub(crate) async fn finance_handler<R, C>(
    State(service): State<Arc<LeadService<R, C>>>,
    Json(application): Json<FinanceApplication>,
) -> Response
where
    R: LeadRepository + 'static,
    C: CatalogSource + 'static,
{
    accepted(service.submit_finance_application(application, today()))
}

pub(crate) async fn inquiry_handler<R, C>(
    State(service): State<Arc<LeadService<R, C>>>,
    Json(inquiry): Json<Inquiry>,
) -> Response
where
    R: LeadRepository + 'static,
    C: CatalogSource + 'static,
{
    accepted(service.submit_inquiry(inquiry, today()))
}

pub(crate) async fn status_handler<R, C>(
    State(service): State<Arc<LeadService<R, C>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    C: CatalogSource + 'static,
{
    let id = LeadId(lead_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "lead not found", "lead_id": id.0 });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn status_update_handler<R, C>(
    State(service): State<Arc<LeadService<R, C>>>,
    Path(lead_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response
where
    R: LeadRepository + 'static,
    C: CatalogSource + 'static,
{
    let id = LeadId(lead_id);
    match service.update_status(&id, update.status) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "lead not found", "lead_id": id.0 });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

fn accepted(result: Result<LeadRecord, LeadServiceError>) -> Response {
    match result {
        Ok(record) => (StatusCode::ACCEPTED, Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: LeadServiceError) -> Response {
    match err {
        LeadServiceError::Violation(violation) => {
            let payload = json!({
                "error": violation.to_string(),
                "field": violation.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        LeadServiceError::Pricing(pricing) => {
            let payload = json!({ "error": pricing.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        LeadServiceError::VehicleNotFound(id) => {
            let payload = json!({ "error": "vehicle not found", "vehicle_id": id.0 });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        LeadServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "lead already exists" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        err @ LeadServiceError::InvalidTransition { .. } => {
            let payload = json!({ "error": err.to_string(), "field": "status" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        LeadServiceError::Catalog(catalog) => {
            warn!(error = %catalog, "catalog source failed during lead intake");
            let payload = json!({ "error": catalog.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
        other => {
            warn!(error = %other, "lead intake failed");
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
