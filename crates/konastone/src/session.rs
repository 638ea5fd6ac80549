//! Per-shopper state carried between requests: favorites, the signed-in
//! user, and the bookings, orders and finance applications made this visit.
//!
//! The value is owned by the caller and serialized wherever the shopper's
//! session lives. Every list keeps the newest entry first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Vehicle, VehicleId};
use crate::pricing::{HirePurchaseQuote, RepaymentTerm};

const FIRST_CHECKOUT_STEP: u8 = 1;
const LAST_CHECKOUT_STEP: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedBooking {
    pub id: String,
    pub vehicle_id: VehicleId,
    pub vehicle_name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Draft,
    Pending,
    Paid,
}

/// Checkout progress; only steps 1 through 3 exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CheckoutStep(u8);

impl CheckoutStep {
    pub const FIRST: Self = Self(FIRST_CHECKOUT_STEP);

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn next(self) -> Option<Self> {
        Self::try_from(self.0 + 1).ok()
    }
}

impl TryFrom<u8> for CheckoutStep {
    type Error = SessionError;

    fn try_from(step: u8) -> Result<Self, Self::Error> {
        if (FIRST_CHECKOUT_STEP..=LAST_CHECKOUT_STEP).contains(&step) {
            Ok(Self(step))
        } else {
            Err(SessionError::InvalidCheckoutStep { step })
        }
    }
}

impl From<CheckoutStep> for u8 {
    fn from(step: CheckoutStep) -> Self {
        step.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub step: CheckoutStep,
    #[serde(default)]
    pub status: OrderStatus,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Review,
    Approved,
    Rejected,
}

/// Finance application as remembered in the shopper's account view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedApplication {
    pub id: String,
    pub vehicle_id: VehicleId,
    pub vehicle_name: String,
    pub deposit: u64,
    pub term: RepaymentTerm,
    pub monthly_payment: u64,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub date: NaiveDate,
}

impl SavedApplication {
    pub fn from_quote(
        id: impl Into<String>,
        vehicle: &Vehicle,
        quote: &HirePurchaseQuote,
        date: NaiveDate,
    ) -> Result<Self, SessionError> {
        let term = RepaymentTerm::try_from(quote.term_months).map_err(|_| {
            SessionError::UnsupportedTerm {
                months: quote.term_months,
            }
        })?;

        Ok(Self {
            id: id.into(),
            vehicle_id: vehicle.id.clone(),
            vehicle_name: vehicle.display_name(),
            deposit: quote.deposit_used,
            term,
            monthly_payment: quote.monthly_payment,
            status: ApplicationStatus::Review,
            date,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("checkout step {step} outside 1..=3")]
    InvalidCheckoutStep { step: u8 },
    #[error("{months} months is not an offered repayment term")]
    UnsupportedTerm { months: u32 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionContext {
    favorites: Vec<VehicleId>,
    user: Option<SessionUser>,
    bookings: Vec<SavedBooking>,
    orders: Vec<Order>,
    finance_applications: Vec<SavedApplication>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn favorites(&self) -> &[VehicleId] {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &VehicleId) -> bool {
        self.favorites.contains(id)
    }

    /// Returns `false` when the vehicle was already saved.
    pub fn add_favorite(&mut self, id: VehicleId) -> bool {
        if self.is_favorite(&id) {
            return false;
        }
        self.favorites.push(id);
        true
    }

    pub fn remove_favorite(&mut self, id: &VehicleId) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|favorite| favorite != id);
        self.favorites.len() != before
    }

    /// Returns whether the vehicle is a favorite afterwards.
    pub fn toggle_favorite(&mut self, id: VehicleId) -> bool {
        if self.remove_favorite(&id) {
            false
        } else {
            self.favorites.push(id);
            true
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, user: SessionUser) {
        self.user = Some(user);
    }

    /// Signs out; saved favorites and history stay with the device.
    pub fn logout(&mut self) -> Option<SessionUser> {
        self.user.take()
    }

    pub fn bookings(&self) -> &[SavedBooking] {
        &self.bookings
    }

    pub fn add_booking(&mut self, booking: SavedBooking) {
        self.bookings.insert(0, booking);
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn add_order(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    pub fn finance_applications(&self) -> &[SavedApplication] {
        &self.finance_applications
    }

    pub fn add_finance_application(&mut self, application: SavedApplication) {
        self.finance_applications.insert(0, application);
    }
}
