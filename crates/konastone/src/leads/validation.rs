use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use super::domain::{
    ContactDetails, FinanceApplication, Inquiry, TestDriveBooking, TradeInRequest,
};
use crate::catalog::domain::EARLIEST_MODEL_YEAR;
use crate::pricing::RepaymentTerm;

const DEFAULT_MINIMUM_MONTHLY_INCOME: u64 = 15_000;
const DEFAULT_MINIMUM_DEPOSIT: u64 = 50_000;
const MIN_NAME_CHARS: usize = 2;
const MIN_NATIONAL_ID_CHARS: usize = 6;
const MIN_MESSAGE_CHARS: usize = 10;
const MAX_MESSAGE_CHARS: usize = 500;

/// Field-level validation failures returned to the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadViolation {
    #[error("name must be at least 2 characters")]
    NameTooShort,
    #[error("'{0}' is not a valid Kenyan phone number")]
    InvalidPhone(String),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("an email address is required")]
    MissingEmail,
    #[error("booking date must be in the future (got {date})")]
    BookingDateNotInFuture { date: NaiveDate },
    #[error("'{0}' is not a valid HH:MM time")]
    InvalidTime(String),
    #[error("vehicle year {year} outside {earliest}..={latest}")]
    YearOutOfRange { year: i32, earliest: i32, latest: i32 },
    #[error("expected price must be greater than zero")]
    MissingExpectedPrice,
    #[error("a valid national ID number is required")]
    NationalIdTooShort,
    #[error("'{0}' is not a valid KRA PIN")]
    InvalidKraPin(String),
    #[error("monthly income {found} is below the minimum of {minimum}")]
    IncomeBelowMinimum { minimum: u64, found: u64 },
    #[error("deposit {found} is below the minimum of {minimum}")]
    DepositBelowMinimum { minimum: u64, found: u64 },
    #[error("repayment period must be 12, 24, 36 or 48 months (got {0})")]
    InvalidRepaymentPeriod(u32),
    #[error("message must be between 10 and 500 characters (got {length})")]
    MessageLength { length: usize },
}

impl LeadViolation {
    /// Form field the message should be shown next to.
    pub fn field(&self) -> &'static str {
        match self {
            LeadViolation::NameTooShort => "full_name",
            LeadViolation::InvalidPhone(_) => "phone",
            LeadViolation::InvalidEmail(_) | LeadViolation::MissingEmail => "email",
            LeadViolation::BookingDateNotInFuture { .. } => "preferred_date",
            LeadViolation::InvalidTime(_) => "preferred_time",
            LeadViolation::YearOutOfRange { .. } => "year",
            LeadViolation::MissingExpectedPrice => "expected_price",
            LeadViolation::NationalIdTooShort => "national_id",
            LeadViolation::InvalidKraPin(_) => "kra_pin",
            LeadViolation::IncomeBelowMinimum { .. } => "monthly_income",
            LeadViolation::DepositBelowMinimum { .. } => "deposit_amount",
            LeadViolation::InvalidRepaymentPeriod(_) => "repayment_period",
            LeadViolation::MessageLength { .. } => "message",
        }
    }
}

/// Thresholds applied to hire-purchase applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadPolicy {
    pub minimum_monthly_income: u64,
    pub minimum_deposit: u64,
}

impl Default for LeadPolicy {
    fn default() -> Self {
        Self {
            minimum_monthly_income: DEFAULT_MINIMUM_MONTHLY_INCOME,
            minimum_deposit: DEFAULT_MINIMUM_DEPOSIT,
        }
    }
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:\+254|0)[17]\d{8}$").expect("phone pattern compiles")
    })
}

fn kra_pin_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Z]\d{9}[A-Z]$").expect("KRA PIN pattern compiles")
    })
}

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("time pattern compiles")
    })
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

/// Checks lead submissions before they reach the sales desk.
#[derive(Debug, Clone, Default)]
pub struct LeadValidator {
    policy: LeadPolicy,
}

impl LeadValidator {
    pub fn with_policy(policy: LeadPolicy) -> Self {
        Self { policy }
    }

    pub fn validate_contact(&self, contact: &ContactDetails) -> Result<(), LeadViolation> {
        if contact.full_name.trim().chars().count() < MIN_NAME_CHARS {
            return Err(LeadViolation::NameTooShort);
        }

        let phone = contact.phone.trim();
        if !phone_pattern().is_match(phone) {
            return Err(LeadViolation::InvalidPhone(contact.phone.clone()));
        }

        if let Some(email) = contact.email.as_deref() {
            if !email_pattern().is_match(email.trim()) {
                return Err(LeadViolation::InvalidEmail(email.to_string()));
            }
        }

        Ok(())
    }

    pub fn validate_test_drive(
        &self,
        booking: &TestDriveBooking,
        today: NaiveDate,
    ) -> Result<(), LeadViolation> {
        self.validate_contact(&booking.contact)?;

        if booking.preferred_date <= today {
            return Err(LeadViolation::BookingDateNotInFuture {
                date: booking.preferred_date,
            });
        }

        if !time_pattern().is_match(booking.preferred_time.trim()) {
            return Err(LeadViolation::InvalidTime(booking.preferred_time.clone()));
        }

        Ok(())
    }

    pub fn validate_trade_in(
        &self,
        request: &TradeInRequest,
        current_year: i32,
    ) -> Result<(), LeadViolation> {
        self.validate_contact(&request.contact)?;

        let latest = current_year + 1;
        if request.year < EARLIEST_MODEL_YEAR || request.year > latest {
            return Err(LeadViolation::YearOutOfRange {
                year: request.year,
                earliest: EARLIEST_MODEL_YEAR,
                latest,
            });
        }

        if request.expected_price == 0 {
            return Err(LeadViolation::MissingExpectedPrice);
        }

        Ok(())
    }

    pub fn validate_finance(&self, application: &FinanceApplication) -> Result<(), LeadViolation> {
        self.validate_contact(&application.contact)?;

        if application.national_id.trim().chars().count() < MIN_NATIONAL_ID_CHARS {
            return Err(LeadViolation::NationalIdTooShort);
        }

        if !kra_pin_pattern().is_match(application.kra_pin.trim()) {
            return Err(LeadViolation::InvalidKraPin(application.kra_pin.clone()));
        }

        if application.monthly_income < self.policy.minimum_monthly_income {
            return Err(LeadViolation::IncomeBelowMinimum {
                minimum: self.policy.minimum_monthly_income,
                found: application.monthly_income,
            });
        }

        if application.deposit_amount < self.policy.minimum_deposit {
            return Err(LeadViolation::DepositBelowMinimum {
                minimum: self.policy.minimum_deposit,
                found: application.deposit_amount,
            });
        }

        if RepaymentTerm::try_from(application.repayment_period).is_err() {
            return Err(LeadViolation::InvalidRepaymentPeriod(
                application.repayment_period,
            ));
        }

        Ok(())
    }

    pub fn validate_inquiry(&self, inquiry: &Inquiry) -> Result<(), LeadViolation> {
        self.validate_contact(&inquiry.contact)?;

        if inquiry.contact.email.is_none() {
            return Err(LeadViolation::MissingEmail);
        }

        let length = inquiry.message.trim().chars().count();
        if !(MIN_MESSAGE_CHARS..=MAX_MESSAGE_CHARS).contains(&length) {
            return Err(LeadViolation::MessageLength { length });
        }

        Ok(())
    }
}
