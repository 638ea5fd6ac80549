use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::domain::{CatalogMode, UnknownVariant, Vehicle, VehicleId};
use super::filter::{CatalogFacets, CatalogFilter, FilterCriteria};
use super::source::{CatalogError, CatalogSource};
use crate::pricing::{DepositRange, HirePurchaseQuote, PricingEngine, PricingError};

/// Query string accepted by the inventory listing; list values are comma separated.
///
/// Absent parameters fall back to the inventory page's opening state: hire-purchase
/// stock under the default price, mileage and year sliders.
#[derive(Debug, Default, Deserialize)]
pub struct InventoryQuery {
    pub mode: Option<String>,
    pub max_price: Option<i64>,
    pub max_mileage: Option<i64>,
    pub min_year: Option<i32>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub location: Option<String>,
    pub q: Option<String>,
}

impl InventoryQuery {
    pub fn into_criteria(self) -> Result<FilterCriteria, UnknownVariant> {
        let mode = match self.mode.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse::<CatalogMode>()?,
            _ => CatalogMode::Hire,
        };
        let defaults = FilterCriteria::storefront_defaults(mode);

        Ok(FilterCriteria {
            mode,
            max_price: self.max_price.or(defaults.max_price),
            max_mileage: self.max_mileage.or(defaults.max_mileage),
            min_year: self.min_year.or(defaults.min_year),
            brands: split_values(self.brand.as_deref()),
            models: split_values(self.model.as_deref()),
            categories: parse_values(self.category.as_deref())?,
            conditions: parse_values(self.condition.as_deref())?,
            transmissions: parse_values(self.transmission.as_deref())?,
            fuel_types: parse_values(self.fuel_type.as_deref())?,
            locations: split_values(self.location.as_deref()),
            search_text: self.q.unwrap_or_default(),
        })
    }
}

fn split_values(raw: Option<&str>) -> BTreeSet<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn parse_values<T>(raw: Option<&str>) -> Result<BTreeSet<T>, UnknownVariant>
where
    T: FromStr<Err = UnknownVariant> + Ord,
{
    split_values(raw)
        .iter()
        .map(|value| value.parse::<T>())
        .collect()
}

/// Card-level view of a vehicle with its headline monthly figure.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleListing {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_from: Option<u64>,
}

impl VehicleListing {
    pub fn from_vehicle(vehicle: Vehicle, engine: &PricingEngine) -> Self {
        Self {
            display_name: vehicle.display_name(),
            monthly_from: engine.monthly_display(&vehicle),
            vehicle,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub mode: CatalogMode,
    pub vehicles: Vec<VehicleListing>,
    pub facets: CatalogFacets,
}

#[derive(Debug, Default, Deserialize)]
pub struct VehicleQuoteQuery {
    pub deposit: Option<i64>,
    pub term: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct VehicleQuoteResponse {
    pub vehicle_id: VehicleId,
    pub display_name: String,
    pub deposit_range: DepositRange,
    pub quote: HirePurchaseQuote,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub price: i64,
    pub deposit: i64,
    pub term_months: u32,
}

/// Read-only catalog endpoints; every request works on a fresh snapshot.
pub fn catalog_router<C>(source: Arc<C>) -> Router
where
    C: CatalogSource + 'static,
{
    Router::new()
        .route("/api/v1/vehicles", get(inventory_handler::<C>))
        .route("/api/v1/vehicles/:vehicle_id", get(vehicle_handler::<C>))
        .route(
            "/api/v1/vehicles/:vehicle_id/quote",
            get(vehicle_quote_handler::<C>),
        )
        .route("/api/v1/quotes", post(quote_handler))
        .with_state(source)
}

pub(crate) async fn inventory_handler<C>(
    State(source): State<Arc<C>>,
    Query(query): Query<InventoryQuery>,
) -> Response
where
    C: CatalogSource + 'static,
{
    let criteria = match query.into_criteria() {
        Ok(criteria) => criteria,
        Err(err) => return unprocessable(err.to_string()),
    };

    let vehicles = match source.list_available_vehicles() {
        Ok(vehicles) => vehicles,
        Err(err) => return catalog_unavailable(err),
    };

    let engine = PricingEngine::standard();
    let facets = CatalogFilter::facets(&vehicles, &criteria);
    let listings = CatalogFilter::apply(&vehicles, &criteria)
        .into_iter()
        .map(|vehicle| VehicleListing::from_vehicle(vehicle, &engine))
        .collect::<Vec<_>>();

    debug!(
        total = facets.total,
        matching = listings.len(),
        mode = %criteria.mode,
        "inventory filtered"
    );

    let body = InventoryResponse {
        mode: criteria.mode,
        vehicles: listings,
        facets,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn vehicle_handler<C>(
    State(source): State<Arc<C>>,
    Path(vehicle_id): Path<String>,
) -> Response
where
    C: CatalogSource + 'static,
{
    let id = VehicleId(vehicle_id);
    match source.get_vehicle_by_id(&id) {
        Ok(Some(vehicle)) => {
            let listing = VehicleListing::from_vehicle(vehicle, &PricingEngine::standard());
            (StatusCode::OK, Json(listing)).into_response()
        }
        Ok(None) => vehicle_not_found(&id),
        Err(err) => catalog_unavailable(err),
    }
}

pub(crate) async fn vehicle_quote_handler<C>(
    State(source): State<Arc<C>>,
    Path(vehicle_id): Path<String>,
    Query(query): Query<VehicleQuoteQuery>,
) -> Response
where
    C: CatalogSource + 'static,
{
    let id = VehicleId(vehicle_id);
    let vehicle = match source.get_vehicle_by_id(&id) {
        Ok(Some(vehicle)) => vehicle,
        Ok(None) => return vehicle_not_found(&id),
        Err(err) => return catalog_unavailable(err),
    };

    let deposit_range = DepositRange::for_vehicle(&vehicle);
    if let Some(deposit) = query.deposit {
        let outside_slider = u64::try_from(deposit).map_or(false, |d| !deposit_range.contains(d));
        if vehicle.hire_purchase_available && outside_slider {
            return deposit_out_of_range(deposit, deposit_range);
        }
    }

    match PricingEngine::standard().quote_vehicle(&vehicle, query.deposit, query.term) {
        Ok(quote) => {
            let body = VehicleQuoteResponse {
                display_name: vehicle.display_name(),
                deposit_range,
                vehicle_id: vehicle.id,
                quote,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => pricing_rejected(err),
    }
}

pub(crate) async fn quote_handler(Json(request): Json<QuoteRequest>) -> Response {
    match PricingEngine::standard().quote(request.price, request.deposit, request.term_months) {
        Ok(quote) => (StatusCode::OK, Json(quote)).into_response(),
        Err(err) => pricing_rejected(err),
    }
}

fn unprocessable(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

fn pricing_rejected(err: PricingError) -> Response {
    let field = match err {
        PricingError::InvalidTerm { .. } => "term_months",
        PricingError::InvalidDeposit { .. } => "deposit",
        PricingError::InvalidPrice { .. }
        | PricingError::HirePurchaseUnavailable
        | PricingError::AmountOutOfRange { .. } => "price",
    };
    let payload = json!({ "error": err.to_string(), "field": field });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

fn deposit_out_of_range(deposit: i64, range: DepositRange) -> Response {
    let payload = json!({
        "error": format!("deposit {deposit} is outside {}..={}", range.min, range.max),
        "field": "deposit",
        "deposit_range": range,
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

fn vehicle_not_found(id: &VehicleId) -> Response {
    let payload = json!({ "error": "vehicle not found", "vehicle_id": id.0 });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn catalog_unavailable(err: CatalogError) -> Response {
    warn!(error = %err, "catalog source failed");
    let payload = json!({ "error": err.to_string() });
    (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
}
