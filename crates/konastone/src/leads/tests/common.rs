use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::catalog::{
    CatalogError, CatalogSource, Category, Condition, FuelType, InMemoryCatalog, StockRecord,
    StockStatus, Transmission, Vehicle, VehicleId,
};
use crate::leads::domain::{
    BookingLocation, ContactDetails, EmploymentStatus, FinanceApplication, Inquiry, LeadId,
    LeadKind, PreferredContact, TestDriveBooking, TradeInRequest,
};
use crate::leads::repository::{LeadRecord, LeadRepository, RepositoryError};
use crate::leads::{lead_router, LeadService, LeadValidator};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 14).expect("valid date")
}

pub(super) fn contact() -> ContactDetails {
    ContactDetails {
        full_name: "Wanjiru Kamau".to_string(),
        phone: "0712345678".to_string(),
        email: Some("wanjiru@example.co.ke".to_string()),
    }
}

fn stock(id: &str, make: &str, model: &str, price: u64, min_deposit: Option<u64>) -> StockRecord {
    StockRecord {
        vehicle: Vehicle {
            id: VehicleId(id.to_string()),
            make: make.to_string(),
            model: model.to_string(),
            year: 2018,
            price,
            mileage: 45_000,
            category: Category::Sedan,
            fuel_type: FuelType::Petrol,
            transmission: Transmission::Automatic,
            condition: Condition::Used,
            location: "Nairobi".to_string(),
            images: vec!["/images/car.jpg".to_string()],
            features: BTreeSet::new(),
            description: String::new(),
            hire_purchase_available: min_deposit.is_some(),
            min_deposit,
            monthly_payment_hint: None,
        },
        status: StockStatus::Available,
    }
}

pub(super) fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![
        stock("1", "Mercedes-Benz", "C-Class C200", 3_500_000, Some(700_000)),
        stock("5", "Subaru", "Outback", 2_100_000, None),
    ])
}

pub(super) fn booking() -> TestDriveBooking {
    TestDriveBooking {
        vehicle_id: VehicleId("1".to_string()),
        contact: contact(),
        preferred_date: NaiveDate::from_ymd_opt(2026, 10, 20).expect("valid date"),
        preferred_time: "10:30".to_string(),
        location: BookingLocation::Showroom,
        notes: None,
    }
}

pub(super) fn trade_in() -> TradeInRequest {
    TradeInRequest {
        contact: contact(),
        vehicle_brand: "Toyota".to_string(),
        vehicle_model: "Fielder".to_string(),
        year: 2015,
        mileage: 120_000,
        condition: Some(Condition::Local),
        expected_price: 950_000,
        description: Some("Single owner, full service history".to_string()),
    }
}

pub(super) fn finance_application() -> FinanceApplication {
    FinanceApplication {
        vehicle_id: VehicleId("1".to_string()),
        contact: contact(),
        national_id: "32817465".to_string(),
        kra_pin: "A012345678Z".to_string(),
        monthly_income: 180_000,
        employment_status: EmploymentStatus::Employed,
        existing_loans: false,
        deposit_amount: 700_000,
        repayment_period: 36,
    }
}

pub(super) fn inquiry() -> Inquiry {
    Inquiry {
        vehicle_id: None,
        contact: contact(),
        message: "Do you have any hybrids arriving next month?".to_string(),
        preferred_contact: PreferredContact::Whatsapp,
    }
}

pub(super) fn validator() -> LeadValidator {
    LeadValidator::default()
}

pub(super) fn build_service() -> (
    LeadService<MemoryRepository, InMemoryCatalog>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = LeadService::new(repository.clone(), Arc::new(catalog()));
    (service, repository)
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<LeadId, LeadRecord>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("lock").len()
    }
}

impl LeadRepository for MemoryRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Ok(self.records.lock().expect("lock").get(id).cloned())
    }

    fn recent(
        &self,
        kind: Option<LeadKind>,
        limit: usize,
    ) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        let mut records: Vec<LeadRecord> = guard
            .values()
            .filter(|record| kind.map_or(true, |kind| record.submission.kind() == kind))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records.truncate(limit);
        Ok(records)
    }
}

pub(super) struct ConflictRepository;

impl LeadRepository for ConflictRepository {
    fn insert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: LeadRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Ok(None)
    }

    fn recent(
        &self,
        _kind: Option<LeadKind>,
        _limit: usize,
    ) -> Result<Vec<LeadRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn insert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: LeadRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(
        &self,
        _kind: Option<LeadKind>,
        _limit: usize,
    ) -> Result<Vec<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct OfflineCatalog;

impl CatalogSource for OfflineCatalog {
    fn list_available_vehicles(&self) -> Result<Vec<Vehicle>, CatalogError> {
        Err(CatalogError::Unavailable("catalog store timed out".to_string()))
    }

    fn get_vehicle_by_id(&self, _id: &VehicleId) -> Result<Option<Vehicle>, CatalogError> {
        Err(CatalogError::Unavailable("catalog store timed out".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn lead_router_with_service<R>(service: LeadService<R, InMemoryCatalog>) -> axum::Router
where
    R: LeadRepository + 'static,
{
    lead_router(Arc::new(service))
}
