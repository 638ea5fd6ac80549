use super::domain::{CatalogMode, Category, Condition, FuelType, Transmission, Vehicle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Price ceiling preselected on the inventory page.
pub const DEFAULT_MAX_PRICE: i64 = 10_000_000;
pub const DEFAULT_MAX_MILEAGE: i64 = 200_000;
pub const DEFAULT_MIN_YEAR: i32 = 2010;

/// Active inventory predicates. Empty sets and `None` bounds match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub mode: CatalogMode,
    pub max_price: Option<i64>,
    pub max_mileage: Option<i64>,
    pub min_year: Option<i32>,
    pub brands: BTreeSet<String>,
    pub models: BTreeSet<String>,
    pub categories: BTreeSet<Category>,
    pub conditions: BTreeSet<Condition>,
    pub transmissions: BTreeSet<Transmission>,
    pub fuel_types: BTreeSet<FuelType>,
    pub locations: BTreeSet<String>,
    pub search_text: String,
}

impl FilterCriteria {
    pub fn for_mode(mode: CatalogMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Slider positions the inventory page opens with.
    pub fn storefront_defaults(mode: CatalogMode) -> Self {
        Self {
            mode,
            max_price: Some(DEFAULT_MAX_PRICE),
            max_mileage: Some(DEFAULT_MAX_MILEAGE),
            min_year: Some(DEFAULT_MIN_YEAR),
            ..Self::default()
        }
    }

    /// Drops model picks that are no longer offered after the brand selection changed.
    pub fn retain_available_models(&mut self, available: &BTreeSet<String>) {
        self.models.retain(|model| available.contains(model));
    }

    fn search_needle(&self) -> Option<String> {
        let trimmed = self.search_text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }
}

/// Distinct values used to populate the filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogFacets {
    pub brands: BTreeSet<String>,
    pub models: BTreeSet<String>,
    pub total: usize,
    pub matching: usize,
}

/// Stateless predicate engine shared by every inventory view.
pub struct CatalogFilter;

impl CatalogFilter {
    pub fn apply(vehicles: &[Vehicle], criteria: &FilterCriteria) -> Vec<Vehicle> {
        let needle = criteria.search_needle();
        vehicles
            .iter()
            .filter(|vehicle| matches_with(vehicle, criteria, needle.as_deref()))
            .cloned()
            .collect()
    }

    pub fn available_brands(vehicles: &[Vehicle]) -> BTreeSet<String> {
        vehicles.iter().map(|vehicle| vehicle.make.clone()).collect()
    }

    pub fn available_models(
        vehicles: &[Vehicle],
        selected_brands: &BTreeSet<String>,
    ) -> BTreeSet<String> {
        if selected_brands.is_empty() {
            return BTreeSet::new();
        }

        vehicles
            .iter()
            .filter(|vehicle| selected_brands.contains(&vehicle.make))
            .map(|vehicle| vehicle.model.clone())
            .collect()
    }

    /// Facets are derived from the unfiltered list so controls never disappear.
    pub fn facets(vehicles: &[Vehicle], criteria: &FilterCriteria) -> CatalogFacets {
        let needle = criteria.search_needle();
        let matching = vehicles
            .iter()
            .filter(|vehicle| matches_with(vehicle, criteria, needle.as_deref()))
            .count();

        CatalogFacets {
            brands: Self::available_brands(vehicles),
            models: Self::available_models(vehicles, &criteria.brands),
            total: vehicles.len(),
            matching,
        }
    }
}

fn matches_with(vehicle: &Vehicle, criteria: &FilterCriteria, needle: Option<&str>) -> bool {
    matches_mode(vehicle, criteria.mode)
        && within_ceiling(vehicle.price, criteria.max_price)
        && within_ceiling(vehicle.mileage, criteria.max_mileage)
        && criteria.min_year.map_or(true, |min| vehicle.year >= min)
        && member_or_wildcard(&criteria.brands, &vehicle.make)
        && matches_model(vehicle, criteria)
        && member_or_wildcard(&criteria.categories, &vehicle.category)
        && member_or_wildcard(&criteria.conditions, &vehicle.condition)
        && member_or_wildcard(&criteria.transmissions, &vehicle.transmission)
        && member_or_wildcard(&criteria.fuel_types, &vehicle.fuel_type)
        && member_or_wildcard(&criteria.locations, &vehicle.location)
        && needle.map_or(true, |needle| matches_search(vehicle, needle))
}

fn matches_mode(vehicle: &Vehicle, mode: CatalogMode) -> bool {
    match mode {
        CatalogMode::Hire => vehicle.hire_purchase_available,
        CatalogMode::Buy => true,
    }
}

// A negative ceiling cannot be met by any unsigned value.
fn within_ceiling(value: u64, ceiling: Option<i64>) -> bool {
    match ceiling {
        None => true,
        Some(max) if max < 0 => false,
        Some(max) => value <= max as u64,
    }
}

fn member_or_wildcard<T: Ord>(selected: &BTreeSet<T>, value: &T) -> bool {
    selected.is_empty() || selected.contains(value)
}

// Models are only narrowed once a single make is picked.
fn matches_model(vehicle: &Vehicle, criteria: &FilterCriteria) -> bool {
    if criteria.brands.len() != 1 {
        return true;
    }
    member_or_wildcard(&criteria.models, &vehicle.model)
}

fn matches_search(vehicle: &Vehicle, needle: &str) -> bool {
    let haystack = format!("{} {} {}", vehicle.make, vehicle.model, vehicle.year).to_lowercase();
    haystack.contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::VehicleId;

    fn vehicle(id: &str, make: &str, model: &str, hire: bool) -> Vehicle {
        Vehicle {
            id: VehicleId(id.to_string()),
            make: make.to_string(),
            model: model.to_string(),
            year: 2018,
            price: 3_000_000,
            mileage: 50_000,
            category: Category::Suv,
            fuel_type: FuelType::Petrol,
            transmission: Transmission::Automatic,
            condition: Condition::Used,
            location: "Nairobi".to_string(),
            images: vec!["/images/car.jpg".to_string()],
            features: BTreeSet::new(),
            description: String::new(),
            hire_purchase_available: hire,
            min_deposit: hire.then_some(600_000),
            monthly_payment_hint: None,
        }
    }

    fn brands(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn negative_ceiling_matches_nothing() {
        let vehicles = vec![vehicle("1", "Toyota", "Prado", true)];
        let criteria = FilterCriteria {
            max_price: Some(-1),
            ..FilterCriteria::default()
        };
        assert!(CatalogFilter::apply(&vehicles, &criteria).is_empty());
    }

    #[test]
    fn model_filter_needs_exactly_one_brand() {
        let vehicles = vec![
            vehicle("1", "Toyota", "Prado", true),
            vehicle("2", "Toyota", "Harrier", true),
            vehicle("3", "Mazda", "CX-5", true),
        ];

        let mut criteria = FilterCriteria {
            models: brands(&["Prado"]),
            ..FilterCriteria::default()
        };
        assert_eq!(CatalogFilter::apply(&vehicles, &criteria).len(), 3);

        criteria.brands = brands(&["Toyota"]);
        let result = CatalogFilter::apply(&vehicles, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].model, "Prado");

        criteria.brands = brands(&["Toyota", "Mazda"]);
        assert_eq!(CatalogFilter::apply(&vehicles, &criteria).len(), 3);
    }

    #[test]
    fn search_covers_year_and_ignores_surrounding_whitespace() {
        let vehicles = vec![vehicle("1", "Toyota", "Prado", true)];
        let criteria = FilterCriteria {
            search_text: "  PRADO 2018 ".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(CatalogFilter::apply(&vehicles, &criteria).len(), 1);

        let criteria = FilterCriteria {
            search_text: "   ".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(CatalogFilter::apply(&vehicles, &criteria).len(), 1);
    }

    #[test]
    fn retain_available_models_clears_stale_picks() {
        let mut criteria = FilterCriteria {
            models: brands(&["Prado", "CX-5"]),
            ..FilterCriteria::default()
        };
        criteria.retain_available_models(&brands(&["CX-5", "CX-30"]));
        assert_eq!(criteria.models, brands(&["CX-5"]));
    }

    #[test]
    fn facets_report_counts_for_empty_state() {
        let vehicles = vec![
            vehicle("1", "Toyota", "Prado", true),
            vehicle("2", "Subaru", "Outback", false),
        ];
        let criteria = FilterCriteria {
            mode: CatalogMode::Hire,
            brands: brands(&["Subaru"]),
            ..FilterCriteria::default()
        };

        let facets = CatalogFilter::facets(&vehicles, &criteria);
        assert_eq!(facets.total, 2);
        assert_eq!(facets.matching, 0);
        assert_eq!(facets.brands, brands(&["Subaru", "Toyota"]));
        assert_eq!(facets.models, brands(&["Outback"]));
    }
}
