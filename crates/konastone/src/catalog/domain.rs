use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Earliest model year the showroom lists.
pub const EARLIEST_MODEL_YEAR: i32 = 1990;

/// Substituted when a vehicle arrives without gallery images.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder-car.jpg";

/// Opaque identifier assigned by the catalog store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raised when a textual attribute does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} '{value}'")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

macro_rules! catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $slug:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const fn ordered() -> &'static [Self] {
                &[$(Self::$variant,)+]
            }

            pub const fn slug(self) -> &'static str {
                match self {
                    $(Self::$variant => $slug,)+
                }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = value.trim().to_ascii_lowercase();
                match normalized.as_str() {
                    $($slug => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        field: $field,
                        value: value.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.slug())
            }
        }
    };
}

catalog_enum! {
    /// Body type used by the inventory category chips.
    Category, "category" {
        Suv => "suv", "SUV";
        Sedan => "sedan", "Sedan";
        Hatchback => "hatchback", "Hatchback";
        Truck => "truck", "Truck";
    }
}

catalog_enum! {
    FuelType, "fuel type" {
        Petrol => "petrol", "Petrol";
        Diesel => "diesel", "Diesel";
        Hybrid => "hybrid", "Hybrid";
        Electric => "electric", "Electric";
    }
}

catalog_enum! {
    Transmission, "transmission" {
        Automatic => "automatic", "Automatic";
        Manual => "manual", "Manual";
        Tiptronic => "tiptronic", "Tiptronic";
    }
}

catalog_enum! {
    /// `Local` marks vehicles previously registered in Kenya.
    Condition, "condition" {
        New => "new", "Brand New";
        Used => "used", "Foreign Used";
        Local => "local", "Locally Used";
    }
}

catalog_enum! {
    StockStatus, "stock status" {
        Available => "available", "Available";
        Reserved => "reserved", "Reserved";
        Sold => "sold", "Sold";
    }
}

catalog_enum! {
    /// Whether the shopper is browsing financed or cash stock.
    CatalogMode, "mode" {
        Hire => "hire", "Hire Purchase";
        Buy => "buy", "Direct Purchase";
    }
}

impl Default for CatalogMode {
    fn default() -> Self {
        Self::Buy
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: u64,
    pub mileage: u64,
    pub category: Category,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub condition: Condition,
    pub location: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: BTreeSet<String>,
    #[serde(default)]
    pub description: String,
    pub hire_purchase_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_deposit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment_hint: Option<u64>,
}

impl Vehicle {
    /// Title used on cards and lead messages, e.g. `2020 Toyota Prado TX-L`.
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }

    pub fn with_placeholder_images(mut self) -> Self {
        self.images.retain(|uri| !uri.trim().is_empty());
        if self.images.is_empty() {
            self.images.push(PLACEHOLDER_IMAGE.to_string());
        }
        self
    }

    /// Checks the catalog invariants against the supplied calendar year.
    pub fn validate(&self, current_year: i32) -> Result<(), VehicleError> {
        let latest = current_year + 1;
        if self.year < EARLIEST_MODEL_YEAR || self.year > latest {
            return Err(VehicleError::YearOutOfRange {
                year: self.year,
                earliest: EARLIEST_MODEL_YEAR,
                latest,
            });
        }

        if self.hire_purchase_available {
            match self.min_deposit {
                None => return Err(VehicleError::MissingMinDeposit),
                Some(deposit) if deposit > self.price => {
                    return Err(VehicleError::MinDepositExceedsPrice {
                        min_deposit: deposit,
                        price: self.price,
                    })
                }
                Some(_) => {}
            }
        }

        if self.images.is_empty() {
            return Err(VehicleError::MissingImages);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VehicleError {
    #[error("model year {year} outside {earliest}..={latest}")]
    YearOutOfRange { year: i32, earliest: i32, latest: i32 },
    #[error("hire purchase vehicles must advertise a minimum deposit")]
    MissingMinDeposit,
    #[error("minimum deposit {min_deposit} exceeds price {price}")]
    MinDepositExceedsPrice { min_deposit: u64, price: u64 },
    #[error("vehicle has no images")]
    MissingImages,
}

/// Vehicle paired with its stock state as held by the catalog store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub vehicle: Vehicle,
    pub status: StockStatus,
}

impl StockRecord {
    pub fn is_available(&self) -> bool {
        self.status == StockStatus::Available
    }
}
