use serde::{Deserialize, Serialize};
use std::fmt;

use super::PricingError;

/// Repayment durations offered on the hire-purchase calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum RepaymentTerm {
    Months12,
    Months24,
    Months36,
    Months48,
}

impl RepaymentTerm {
    pub const fn ordered() -> [Self; 4] {
        [Self::Months12, Self::Months24, Self::Months36, Self::Months48]
    }

    pub const fn months(self) -> u32 {
        match self {
            Self::Months12 => 12,
            Self::Months24 => 24,
            Self::Months36 => 36,
            Self::Months48 => 48,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Months12 => "12 months",
            Self::Months24 => "24 months",
            Self::Months36 => "36 months",
            Self::Months48 => "48 months",
        }
    }
}

impl Default for RepaymentTerm {
    fn default() -> Self {
        Self::Months36
    }
}

impl TryFrom<u32> for RepaymentTerm {
    type Error = PricingError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        Self::ordered()
            .into_iter()
            .find(|term| term.months() == months)
            .ok_or(PricingError::InvalidTerm { months })
    }
}

impl From<RepaymentTerm> for u32 {
    fn from(term: RepaymentTerm) -> Self {
        term.months()
    }
}

impl fmt::Display for RepaymentTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
