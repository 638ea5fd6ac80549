use super::domain::{
    Category, Condition, FuelType, StockRecord, StockStatus, Transmission, UnknownVariant,
    Vehicle, VehicleError, VehicleId,
};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const LIST_SEPARATOR: char = '|';

#[derive(Debug)]
pub enum InventoryImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { line: u64, reason: RowError },
}

/// Why a single inventory row was refused.
#[derive(Debug)]
pub enum RowError {
    Variant(UnknownVariant),
    Invariant(VehicleError),
    InvalidFlag(String),
    InvalidAmount { column: &'static str, value: String },
    MissingId,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowError::Variant(err) => write!(f, "{}", err),
            RowError::Invariant(err) => write!(f, "{}", err),
            RowError::InvalidFlag(value) => {
                write!(f, "hire_purchase must be yes/no or true/false (got '{}')", value)
            }
            RowError::InvalidAmount { column, value } => {
                write!(f, "{} must be a whole number of shillings (got '{}')", column, value)
            }
            RowError::MissingId => write!(f, "vehicle id is empty"),
        }
    }
}

impl std::fmt::Display for InventoryImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InventoryImportError::Io(err) => write!(f, "failed to read inventory export: {}", err),
            InventoryImportError::Csv(err) => write!(f, "invalid inventory CSV data: {}", err),
            InventoryImportError::Row { line, reason } => {
                write!(f, "inventory row on line {} rejected: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for InventoryImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InventoryImportError::Io(err) => Some(err),
            InventoryImportError::Csv(err) => Some(err),
            InventoryImportError::Row { reason, .. } => match reason {
                RowError::Variant(err) => Some(err),
                RowError::Invariant(err) => Some(err),
                RowError::InvalidFlag(_)
                | RowError::InvalidAmount { .. }
                | RowError::MissingId => None,
            },
        }
    }
}

impl From<std::io::Error> for InventoryImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for InventoryImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<UnknownVariant> for RowError {
    fn from(err: UnknownVariant) -> Self {
        Self::Variant(err)
    }
}

impl From<VehicleError> for RowError {
    fn from(err: VehicleError) -> Self {
        Self::Invariant(err)
    }
}

/// Loads stock from the back-office inventory export.
pub struct InventoryImporter;

impl InventoryImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        current_year: i32,
    ) -> Result<Vec<StockRecord>, InventoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, current_year)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        current_year: i32,
    ) -> Result<Vec<StockRecord>, InventoryImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut records = Vec::new();

        for result in csv_reader.records() {
            let raw = result?;
            let line = raw.position().map(|position| position.line()).unwrap_or(0);
            let row: InventoryRow = raw.deserialize(Some(&headers))?;
            let record = row
                .into_record(current_year)
                .map_err(|reason| InventoryImportError::Row { line, reason })?;
            records.push(record);
        }

        debug!(count = records.len(), "inventory rows imported");
        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct InventoryRow {
    id: String,
    make: String,
    model: String,
    year: i32,
    price: u64,
    mileage: u64,
    category: String,
    fuel_type: String,
    transmission: String,
    condition: String,
    #[serde(default)]
    location: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    hire_purchase: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    min_deposit: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    monthly_hint: Option<String>,
    #[serde(default)]
    images: String,
    #[serde(default)]
    features: String,
    #[serde(default)]
    description: String,
}

impl InventoryRow {
    fn into_record(self, current_year: i32) -> Result<StockRecord, RowError> {
        if self.id.is_empty() {
            return Err(RowError::MissingId);
        }

        let status = match self.status.as_deref() {
            Some(value) => value.parse::<StockStatus>()?,
            None => StockStatus::Available,
        };
        let hire_purchase_available = match self.hire_purchase.as_deref() {
            Some(value) => parse_flag(value)?,
            None => false,
        };
        let min_deposit = parse_amount("min_deposit", self.min_deposit.as_deref())?;
        let monthly_payment_hint = parse_amount("monthly_hint", self.monthly_hint.as_deref())?;

        let vehicle = Vehicle {
            id: VehicleId(self.id),
            make: self.make,
            model: self.model,
            year: self.year,
            price: self.price,
            mileage: self.mileage,
            category: self.category.parse::<Category>()?,
            fuel_type: self.fuel_type.parse::<FuelType>()?,
            transmission: self.transmission.parse::<Transmission>()?,
            condition: self.condition.parse::<Condition>()?,
            location: self.location,
            images: split_list(&self.images),
            features: split_list(&self.features).into_iter().collect::<BTreeSet<_>>(),
            description: self.description,
            hire_purchase_available,
            min_deposit,
            monthly_payment_hint,
        }
        .with_placeholder_images();

        vehicle.validate(current_year)?;
        Ok(StockRecord { vehicle, status })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_flag(value: &str) -> Result<bool, RowError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        _ => Err(RowError::InvalidFlag(value.to_string())),
    }
}

// Exports sometimes carry thousands separators ("1,500,000").
fn parse_amount(column: &'static str, value: Option<&str>) -> Result<Option<u64>, RowError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let digits: String = value.chars().filter(|ch| *ch != ',' && *ch != '_').collect();
    digits
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| RowError::InvalidAmount {
            column,
            value: value.to_string(),
        })
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::PLACEHOLDER_IMAGE;
    use std::io::Cursor;

    const HEADER: &str = "id,make,model,year,price,mileage,category,fuel_type,transmission,condition,location,status,hire_purchase,min_deposit,monthly_hint,images,features,description\n";

    fn import(rows: &str) -> Result<Vec<StockRecord>, InventoryImportError> {
        let csv = format!("{HEADER}{rows}");
        InventoryImporter::from_reader(Cursor::new(csv.into_bytes()), 2026)
    }

    #[test]
    fn imports_rows_and_substitutes_placeholder() {
        let records = import(
            "7,Toyota,Fielder,2017,1650000,98000,hatchback,petrol,automatic,local,Mombasa,reserved,yes,\"350,000\",,,Reverse camera|Alloy wheels,Clean unit\n",
        )
        .expect("rows import");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.status, StockStatus::Reserved);
        assert_eq!(record.vehicle.min_deposit, Some(350_000));
        assert_eq!(record.vehicle.images, vec![PLACEHOLDER_IMAGE.to_string()]);
        assert!(record.vehicle.features.contains("Alloy wheels"));
        assert_eq!(record.vehicle.condition, Condition::Local);
    }

    #[test]
    fn reports_line_of_invalid_row() {
        let err = import(
            "1,Mazda,CX-5,2019,3200000,35000,suv,diesel,automatic,used,Nairobi,,yes,800000,,/img/cx5.jpg,,\n\
             2,Mazda,Demio,2015,900000,99000,compact,petrol,automatic,used,Nairobi,,no,,,,,\n",
        )
        .expect_err("unknown category rejected");

        match err {
            InventoryImportError::Row {
                line,
                reason: RowError::Variant(variant),
            } => {
                assert_eq!(line, 3);
                assert_eq!(variant.field, "category");
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn hire_purchase_rows_need_a_deposit() {
        let err = import(
            "3,Subaru,Forester,2018,2600000,70000,suv,petrol,automatic,used,Nakuru,,yes,,,,,\n",
        )
        .expect_err("missing deposit rejected");

        assert!(matches!(
            err,
            InventoryImportError::Row {
                reason: RowError::Invariant(VehicleError::MissingMinDeposit),
                ..
            }
        ));
    }

    #[test]
    fn unreadable_amounts_are_rejected_not_dropped() {
        let err = import(
            "4,Subaru,Outback,2016,2100000,85000,suv,petrol,automatic,local,Nakuru,,no,,abc,,,\n",
        )
        .expect_err("garbage hint rejected");
        match err {
            InventoryImportError::Row {
                line,
                reason: RowError::InvalidAmount { column, value },
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, "monthly_hint");
                assert_eq!(value, "abc");
            }
            other => panic!("expected invalid amount, got {other:?}"),
        }

        let err = import(
            "3,Subaru,Forester,2018,2600000,70000,suv,petrol,automatic,used,Nakuru,,yes,80O000,,,,\n",
        )
        .expect_err("typo in deposit rejected");
        assert!(matches!(
            err,
            InventoryImportError::Row {
                reason: RowError::InvalidAmount {
                    column: "min_deposit",
                    ..
                },
                ..
            }
        ));
        assert!(err.to_string().contains("80O000"));
    }
}
