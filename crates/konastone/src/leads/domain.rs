use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Condition, VehicleId};

/// Identifier wrapper for captured leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeadId(pub String);

/// How to reach the customer; email is optional outside general inquiries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingLocation {
    #[default]
    Showroom,
    Home,
    Office,
}

impl BookingLocation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Showroom => "Showroom",
            Self::Home => "Home",
            Self::Office => "Office",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestDriveBooking {
    pub vehicle_id: VehicleId,
    pub contact: ContactDetails,
    pub preferred_date: NaiveDate,
    /// 24-hour `HH:MM`.
    pub preferred_time: String,
    #[serde(default)]
    pub location: BookingLocation,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Customer vehicle offered in part exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInRequest {
    pub contact: ContactDetails,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub year: i32,
    pub mileage: u64,
    #[serde(default)]
    pub condition: Option<Condition>,
    pub expected_price: u64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    BusinessOwner,
}

/// Hire-purchase application started from the vehicle calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceApplication {
    pub vehicle_id: VehicleId,
    pub contact: ContactDetails,
    pub national_id: String,
    pub kra_pin: String,
    pub monthly_income: u64,
    pub employment_status: EmploymentStatus,
    #[serde(default)]
    pub existing_loans: bool,
    pub deposit_amount: u64,
    pub repayment_period: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredContact {
    #[default]
    Email,
    Phone,
    Whatsapp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    #[serde(default)]
    pub vehicle_id: Option<VehicleId>,
    pub contact: ContactDetails,
    pub message: String,
    #[serde(default)]
    pub preferred_contact: PreferredContact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeadSubmission {
    TestDrive(TestDriveBooking),
    TradeIn(TradeInRequest),
    Finance(FinanceApplication),
    Inquiry(Inquiry),
}

impl LeadSubmission {
    pub fn kind(&self) -> LeadKind {
        match self {
            LeadSubmission::TestDrive(_) => LeadKind::TestDrive,
            LeadSubmission::TradeIn(_) => LeadKind::TradeIn,
            LeadSubmission::Finance(_) => LeadKind::Finance,
            LeadSubmission::Inquiry(_) => LeadKind::Inquiry,
        }
    }

    pub fn contact(&self) -> &ContactDetails {
        match self {
            LeadSubmission::TestDrive(booking) => &booking.contact,
            LeadSubmission::TradeIn(request) => &request.contact,
            LeadSubmission::Finance(application) => &application.contact,
            LeadSubmission::Inquiry(inquiry) => &inquiry.contact,
        }
    }

    pub fn vehicle_id(&self) -> Option<&VehicleId> {
        match self {
            LeadSubmission::TestDrive(booking) => Some(&booking.vehicle_id),
            LeadSubmission::Finance(application) => Some(&application.vehicle_id),
            LeadSubmission::Inquiry(inquiry) => inquiry.vehicle_id.as_ref(),
            LeadSubmission::TradeIn(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadKind {
    TestDrive,
    TradeIn,
    Finance,
    Inquiry,
}

impl LeadKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::TestDrive => "Test Drive",
            Self::TradeIn => "Trade-In",
            Self::Finance => "Hire Purchase Application",
            Self::Inquiry => "Inquiry",
        }
    }
}

/// Follow-up state as tracked by the sales desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    UnderReview,
    Approved,
    Rejected,
    Closed,
}

impl LeadStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::UnderReview => "Under Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Closed => "Closed",
        }
    }

    /// Review runs new → under_review → approved | rejected; any open lead may be closed.
    pub const fn can_advance_to(self, next: LeadStatus) -> bool {
        matches!(
            (self, next),
            (Self::New, Self::UnderReview)
                | (Self::UnderReview, Self::Approved | Self::Rejected)
                | (Self::New | Self::UnderReview | Self::Approved | Self::Rejected, Self::Closed)
        )
    }
}
