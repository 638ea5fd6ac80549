//! Hire-purchase installment estimation.
//!
//! Interest is charged flat on the financed principal for the whole term
//! (`principal × rate × years`), not on a reducing balance. Monthly figures are
//! always rounded up to the next whole shilling.

mod format;
mod term;

pub use format::format_kes;
pub use term::RepaymentTerm;

use crate::catalog::Vehicle;
use serde::{Deserialize, Serialize};

/// Flat annual rate applied to every quote, in basis points (12% p.a.).
pub const ANNUAL_RATE_BPS: u32 = 1_200;

/// Granularity of the deposit slider on the vehicle page.
pub const DEPOSIT_STEP: u64 = 50_000;

const BPS_PER_UNIT: u128 = 10_000;
const MONTHS_PER_YEAR: u128 = 12;

/// Validation failures surfaced to the customer as form-field messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("repayment period must be 12, 24, 36 or 48 months (got {months})")]
    InvalidTerm { months: u32 },
    #[error("deposit cannot be negative (got {deposit})")]
    InvalidDeposit { deposit: i64 },
    #[error("vehicle price must be greater than zero (got {price})")]
    InvalidPrice { price: i64 },
    #[error("hire purchase is not offered on this vehicle")]
    HirePurchaseUnavailable,
    #[error("catalog amount {amount} is larger than a quote can carry")]
    AmountOutOfRange { amount: u64 },
}

/// Non-fatal adjustments applied while building a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum QuoteWarning {
    DepositClamped { requested: u64, applied: u64 },
}

impl QuoteWarning {
    pub fn message(&self) -> String {
        match self {
            QuoteWarning::DepositClamped { requested, applied } => format!(
                "deposit of {} exceeds the vehicle price; using {}",
                format_kes(*requested),
                format_kes(*applied)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HirePurchaseQuote {
    pub principal: u64,
    pub deposit_used: u64,
    pub term_months: u32,
    pub total_interest: u64,
    pub total_payable: u64,
    pub monthly_payment: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<QuoteWarning>,
}

/// Deposit slider bounds for a single vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRange {
    pub min: u64,
    pub max: u64,
    pub step: u64,
}

impl DepositRange {
    /// Minimum is the advertised deposit; the slider tops out at half the price.
    pub fn for_vehicle(vehicle: &Vehicle) -> Self {
        let min = vehicle.min_deposit.unwrap_or(0);
        let max = (vehicle.price / 2).max(min);
        Self {
            min,
            max,
            step: DEPOSIT_STEP,
        }
    }

    pub fn contains(&self, deposit: u64) -> bool {
        deposit >= self.min && deposit <= self.max
    }
}

/// Stateless calculator turning price, deposit and term into an installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingEngine {
    annual_rate_bps: u32,
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl PricingEngine {
    pub const fn standard() -> Self {
        Self {
            annual_rate_bps: ANNUAL_RATE_BPS,
        }
    }

    pub fn quote(
        &self,
        price: i64,
        deposit: i64,
        term_months: u32,
    ) -> Result<HirePurchaseQuote, PricingError> {
        let term = RepaymentTerm::try_from(term_months)?;
        if price <= 0 {
            return Err(PricingError::InvalidPrice { price });
        }
        if deposit < 0 {
            return Err(PricingError::InvalidDeposit { deposit });
        }

        let price = price as u64;
        let requested = deposit as u64;
        let mut warnings = Vec::new();
        let deposit_used = if requested > price {
            warnings.push(QuoteWarning::DepositClamped {
                requested,
                applied: price,
            });
            price
        } else {
            requested
        };

        let mut quote = self.quote_term(price, deposit_used, term);
        quote.warnings = warnings;
        Ok(quote)
    }

    /// Quote for a catalog vehicle, defaulting to its minimum deposit over 36 months.
    pub fn quote_vehicle(
        &self,
        vehicle: &Vehicle,
        deposit: Option<i64>,
        term_months: Option<u32>,
    ) -> Result<HirePurchaseQuote, PricingError> {
        if !vehicle.hire_purchase_available {
            return Err(PricingError::HirePurchaseUnavailable);
        }

        let deposit = match deposit {
            Some(deposit) => deposit,
            None => signed_amount(vehicle.min_deposit.unwrap_or(0))?,
        };
        let term_months = term_months.unwrap_or_else(|| RepaymentTerm::default().months());

        self.quote(signed_amount(vehicle.price)?, deposit, term_months)
    }

    /// Monthly figure shown on inventory cards.
    pub fn monthly_display(&self, vehicle: &Vehicle) -> Option<u64> {
        if !vehicle.hire_purchase_available {
            return None;
        }
        if let Some(hint) = vehicle.monthly_payment_hint {
            return Some(hint);
        }

        self.quote_vehicle(vehicle, None, None)
            .ok()
            .map(|quote| quote.monthly_payment)
    }

    fn quote_term(&self, price: u64, deposit: u64, term: RepaymentTerm) -> HirePurchaseQuote {
        let principal = price - deposit;
        let months = term.months();

        // interest = principal × (bps / 10_000) × (months / 12), kept as one fraction
        let denominator = BPS_PER_UNIT * MONTHS_PER_YEAR;
        let interest_numerator = principal as u128 * self.annual_rate_bps as u128 * months as u128;
        let payable_numerator = principal as u128 * denominator + interest_numerator;

        HirePurchaseQuote {
            principal,
            deposit_used: deposit,
            term_months: months,
            total_interest: ceil_div(interest_numerator, denominator),
            total_payable: ceil_div(payable_numerator, denominator),
            monthly_payment: ceil_div(payable_numerator, denominator * months as u128),
            warnings: Vec::new(),
        }
    }
}

fn signed_amount(amount: u64) -> Result<i64, PricingError> {
    i64::try_from(amount).map_err(|_| PricingError::AmountOutOfRange { amount })
}

fn ceil_div(numerator: u128, denominator: u128) -> u64 {
    let quotient = numerator.div_ceil(denominator);
    u64::try_from(quotient).unwrap_or(u64::MAX)
}
