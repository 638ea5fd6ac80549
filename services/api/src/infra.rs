use chrono::{Datelike, Local, NaiveDate};
use konastone::catalog::{showroom_inventory, InMemoryCatalog, InventoryImporter};
use konastone::config::CatalogConfig;
use konastone::error::AppError;
use konastone::leads::{LeadId, LeadKind, LeadRecord, LeadRepository, RepositoryError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local lead store used until the hosted tables are wired in.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    records: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
}

impl InMemoryLeadRepository {
    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("lead mutex poisoned").len()
    }
}

impl LeadRepository for InMemoryLeadRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lead mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("lead mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lead mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(
        &self,
        kind: Option<LeadKind>,
        limit: usize,
    ) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lead mutex poisoned");
        let mut records: Vec<LeadRecord> = guard
            .values()
            .filter(|record| kind.map_or(true, |kind| record.submission.kind() == kind))
            .cloned()
            .collect();
        // ids come from a monotonic sequence
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records.truncate(limit);
        Ok(records)
    }
}

pub(crate) fn current_year() -> i32 {
    Local::now().year()
}

/// Builds the catalog from `CATALOG_CSV`, or the seeded showroom when unset.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<InMemoryCatalog, AppError> {
    let records = match config.csv_path.as_ref() {
        Some(path) => {
            let records = InventoryImporter::from_path(path, current_year())?;
            info!(path = %path.display(), count = records.len(), "inventory imported");
            records
        }
        None => showroom_inventory(),
    };

    Ok(InMemoryCatalog::new(records))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
