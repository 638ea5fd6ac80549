use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{LeadId, LeadKind, LeadStatus, LeadSubmission};
use crate::pricing::HirePurchaseQuote;

/// Stored lead with the context resolved at intake time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: LeadId,
    pub status: LeadStatus,
    pub received_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<HirePurchaseQuote>,
    pub submission: LeadSubmission,
}

impl LeadRecord {
    pub fn status_view(&self) -> LeadStatusView {
        LeadStatusView {
            lead_id: self.id.clone(),
            kind: self.submission.kind().label(),
            status: self.status.label(),
            received_on: self.received_on,
            vehicle_name: self.vehicle_name.clone(),
            monthly_payment: self.quote.as_ref().map(|quote| quote.monthly_payment),
            warnings: self
                .quote
                .iter()
                .flat_map(|quote| quote.warnings.iter().map(|warning| warning.message()))
                .collect(),
        }
    }
}

/// Storage abstraction over the hosted lead tables.
pub trait LeadRepository: Send + Sync {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError>;
    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError>;
    fn recent(&self, kind: Option<LeadKind>, limit: usize)
        -> Result<Vec<LeadRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Customer-facing summary; contact details are never echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct LeadStatusView {
    pub lead_id: LeadId,
    pub kind: &'static str,
    pub status: &'static str,
    pub received_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<u64>,
    /// Quote adjustments the customer should see, such as a clamped deposit.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
