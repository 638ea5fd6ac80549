//! Vehicle catalog: the data model, the inventory filter, and the read
//! contract to the hosted catalog store.

pub mod domain;
mod filter;
mod import;
pub mod router;
mod seed;
mod source;

pub use domain::{
    CatalogMode, Category, Condition, FuelType, StockRecord, StockStatus, Transmission,
    UnknownVariant, Vehicle, VehicleError, VehicleId, PLACEHOLDER_IMAGE,
};
pub use filter::{
    CatalogFacets, CatalogFilter, FilterCriteria, DEFAULT_MAX_MILEAGE, DEFAULT_MAX_PRICE,
    DEFAULT_MIN_YEAR,
};
pub use import::{InventoryImportError, InventoryImporter, RowError};
pub use router::catalog_router;
pub use seed::showroom_inventory;
pub use source::{CatalogError, CatalogSource, InMemoryCatalog};
