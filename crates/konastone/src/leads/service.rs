use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use super::domain::{
    FinanceApplication, Inquiry, LeadId, LeadKind, LeadStatus, LeadSubmission, TestDriveBooking,
    TradeInRequest,
};
use super::repository::{LeadRecord, LeadRepository, RepositoryError};
use super::validation::{LeadValidator, LeadViolation};
use crate::catalog::{CatalogError, CatalogSource, Vehicle, VehicleId};
use crate::pricing::{HirePurchaseQuote, PricingEngine, PricingError};

const RECENT_LIMIT_MAX: usize = 100;

/// Service composing validation, the catalog, the pricing engine and lead storage.
pub struct LeadService<R, C> {
    validator: Arc<LeadValidator>,
    repository: Arc<R>,
    catalog: Arc<C>,
    engine: PricingEngine,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

impl<R, C> LeadService<R, C>
where
    R: LeadRepository + 'static,
    C: CatalogSource + 'static,
{
    pub fn new(repository: Arc<R>, catalog: Arc<C>) -> Self {
        Self::with_validator(LeadValidator::default(), repository, catalog)
    }

    pub fn with_validator(validator: LeadValidator, repository: Arc<R>, catalog: Arc<C>) -> Self {
        Self {
            validator: Arc::new(validator),
            repository,
            catalog,
            engine: PricingEngine::standard(),
        }
    }

    pub fn submit_test_drive(
        &self,
        booking: TestDriveBooking,
        today: NaiveDate,
    ) -> Result<LeadRecord, LeadServiceError> {
        self.validator.validate_test_drive(&booking, today)?;
        let vehicle = self.require_vehicle(&booking.vehicle_id)?;

        self.store(
            LeadSubmission::TestDrive(booking),
            today,
            Some(vehicle.display_name()),
            None,
        )
    }

    pub fn submit_trade_in(
        &self,
        request: TradeInRequest,
        today: NaiveDate,
    ) -> Result<LeadRecord, LeadServiceError> {
        self.validator.validate_trade_in(&request, today.year())?;
        self.store(LeadSubmission::TradeIn(request), today, None, None)
    }

    /// Validates the application and attaches the installment the customer was shown.
    pub fn submit_finance_application(
        &self,
        application: FinanceApplication,
        today: NaiveDate,
    ) -> Result<LeadRecord, LeadServiceError> {
        self.validator.validate_finance(&application)?;
        let vehicle = self.require_vehicle(&application.vehicle_id)?;

        if let Some(minimum) = vehicle.min_deposit {
            if application.deposit_amount < minimum {
                return Err(LeadViolation::DepositBelowMinimum {
                    minimum,
                    found: application.deposit_amount,
                }
                .into());
            }
        }

        let quote = self.quote_for(&vehicle, &application)?;
        self.store(
            LeadSubmission::Finance(application),
            today,
            Some(vehicle.display_name()),
            Some(quote),
        )
    }

    pub fn submit_inquiry(
        &self,
        inquiry: Inquiry,
        today: NaiveDate,
    ) -> Result<LeadRecord, LeadServiceError> {
        self.validator.validate_inquiry(&inquiry)?;
        let vehicle_name = match inquiry.vehicle_id.as_ref() {
            Some(id) => Some(self.require_vehicle(id)?.display_name()),
            None => None,
        };

        self.store(LeadSubmission::Inquiry(inquiry), today, vehicle_name, None)
    }

    pub fn get(&self, id: &LeadId) -> Result<LeadRecord, LeadServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Moves a lead along the sales-desk workflow, refusing skipped or reversed steps.
    pub fn update_status(
        &self,
        id: &LeadId,
        next: LeadStatus,
    ) -> Result<LeadRecord, LeadServiceError> {
        let mut record = self.get(id)?;
        let from = record.status;
        if !from.can_advance_to(next) {
            warn!(
                lead_id = %id.0,
                from = from.label(),
                to = next.label(),
                "status change refused"
            );
            return Err(LeadServiceError::InvalidTransition { from, to: next });
        }

        record.status = next;
        self.repository.update(record.clone())?;
        info!(
            lead_id = %id.0,
            from = from.label(),
            to = next.label(),
            "lead status updated"
        );
        Ok(record)
    }

    pub fn recent(
        &self,
        kind: Option<LeadKind>,
        limit: usize,
    ) -> Result<Vec<LeadRecord>, LeadServiceError> {
        let records = self.repository.recent(kind, limit.min(RECENT_LIMIT_MAX))?;
        Ok(records)
    }

    fn require_vehicle(&self, id: &VehicleId) -> Result<Vehicle, LeadServiceError> {
        self.catalog
            .get_vehicle_by_id(id)?
            .ok_or_else(|| LeadServiceError::VehicleNotFound(id.clone()))
    }

    fn quote_for(
        &self,
        vehicle: &Vehicle,
        application: &FinanceApplication,
    ) -> Result<HirePurchaseQuote, PricingError> {
        let deposit = i64::try_from(application.deposit_amount).unwrap_or(i64::MAX);
        self.engine
            .quote_vehicle(vehicle, Some(deposit), Some(application.repayment_period))
    }

    fn store(
        &self,
        submission: LeadSubmission,
        today: NaiveDate,
        vehicle_name: Option<String>,
        quote: Option<HirePurchaseQuote>,
    ) -> Result<LeadRecord, LeadServiceError> {
        let record = LeadRecord {
            id: next_lead_id(),
            status: LeadStatus::New,
            received_on: today,
            vehicle_name,
            quote,
            submission,
        };

        let stored = self.repository.insert(record)?;
        info!(
            lead_id = %stored.id.0,
            kind = stored.submission.kind().label(),
            "lead captured"
        );
        Ok(stored)
    }
}

/// Error raised by the lead service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Violation(#[from] LeadViolation),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error("vehicle {0} is not in the catalog")]
    VehicleNotFound(VehicleId),
    #[error("lead cannot move from {} to {}", .from.label(), .to.label())]
    InvalidTransition { from: LeadStatus, to: LeadStatus },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
