use std::sync::{Arc, RwLock};

use super::domain::{StockRecord, Vehicle, VehicleId};

/// Read contract for the hosted catalog store.
pub trait CatalogSource: Send + Sync {
    /// Every vehicle currently marked available, images and taxonomy resolved.
    fn list_available_vehicles(&self) -> Result<Vec<Vehicle>, CatalogError>;
    fn get_vehicle_by_id(&self, id: &VehicleId) -> Result<Option<Vehicle>, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Snapshot-backed catalog used for seeded demos, CSV imports and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    records: Arc<RwLock<Vec<StockRecord>>>,
}

impl InMemoryCatalog {
    pub fn new(records: Vec<StockRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().expect("catalog lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CatalogSource for InMemoryCatalog {
    fn list_available_vehicles(&self) -> Result<Vec<Vehicle>, CatalogError> {
        let guard = self.records.read().expect("catalog lock poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.is_available())
            .map(|record| record.vehicle.clone())
            .collect())
    }

    fn get_vehicle_by_id(&self, id: &VehicleId) -> Result<Option<Vehicle>, CatalogError> {
        let guard = self.records.read().expect("catalog lock poisoned");
        Ok(guard
            .iter()
            .find(|record| &record.vehicle.id == id)
            .map(|record| record.vehicle.clone()))
    }
}
