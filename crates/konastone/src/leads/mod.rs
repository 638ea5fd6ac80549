//! Lead capture for the storefront forms: test-drive bookings, trade-in
//! requests, hire-purchase applications and general inquiries.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    BookingLocation, ContactDetails, EmploymentStatus, FinanceApplication, Inquiry, LeadId,
    LeadKind, LeadStatus, LeadSubmission, PreferredContact, TestDriveBooking, TradeInRequest,
};
pub use repository::{LeadRecord, LeadRepository, LeadStatusView, RepositoryError};
pub use router::lead_router;
pub use service::{LeadService, LeadServiceError};
pub use validation::{LeadPolicy, LeadValidator, LeadViolation};
