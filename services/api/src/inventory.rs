use crate::infra::load_catalog;
use clap::Args;
use konastone::catalog::router::{InventoryQuery, VehicleListing};
use konastone::catalog::{CatalogFilter, CatalogSource, VehicleId};
use konastone::config::AppConfig;
use konastone::error::AppError;
use konastone::pricing::{format_kes, DepositRange, HirePurchaseQuote, PricingEngine};

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// `hire` for hire-purchase stock (default), `buy` for everything
    #[arg(long)]
    pub(crate) mode: Option<String>,
    #[arg(long)]
    pub(crate) max_price: Option<i64>,
    #[arg(long)]
    pub(crate) max_mileage: Option<i64>,
    #[arg(long)]
    pub(crate) min_year: Option<i32>,
    /// Comma-separated makes
    #[arg(long)]
    pub(crate) brand: Option<String>,
    /// Comma-separated models; applied only with a single brand
    #[arg(long)]
    pub(crate) model: Option<String>,
    #[arg(long)]
    pub(crate) category: Option<String>,
    #[arg(long)]
    pub(crate) condition: Option<String>,
    #[arg(long)]
    pub(crate) transmission: Option<String>,
    #[arg(long)]
    pub(crate) fuel_type: Option<String>,
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Free-text search over make, model and year
    #[arg(long, short = 'q')]
    pub(crate) search: Option<String>,
    /// Print the listings as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

impl ListArgs {
    pub(crate) fn into_query(self) -> InventoryQuery {
        InventoryQuery {
            mode: self.mode,
            max_price: self.max_price,
            max_mileage: self.max_mileage,
            min_year: self.min_year,
            brand: self.brand,
            model: self.model,
            category: self.category,
            condition: self.condition,
            transmission: self.transmission,
            fuel_type: self.fuel_type,
            location: self.location,
            q: self.search,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    #[arg(long)]
    pub(crate) vehicle_id: String,
    /// Deposit in KES (defaults to the vehicle's minimum deposit)
    #[arg(long)]
    pub(crate) deposit: Option<i64>,
    /// Repayment term in months: 12, 24, 36 or 48 (defaults to 36)
    #[arg(long)]
    pub(crate) term: Option<u32>,
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_list(args: ListArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.catalog)?;
    let as_json = args.json;

    let criteria = args.into_query().into_criteria()?;
    let vehicles = catalog.list_available_vehicles()?;
    let engine = PricingEngine::standard();
    let listings: Vec<VehicleListing> = CatalogFilter::apply(&vehicles, &criteria)
        .into_iter()
        .map(|vehicle| VehicleListing::from_vehicle(vehicle, &engine))
        .collect();

    if as_json {
        let rendered = serde_json::to_string_pretty(&listings).map_err(std::io::Error::from)?;
        println!("{rendered}");
        return Ok(());
    }

    println!(
        "{} of {} vehicles ({})",
        listings.len(),
        vehicles.len(),
        criteria.mode.label()
    );
    for listing in &listings {
        println!("{}", listing_line(listing));
    }
    if listings.is_empty() {
        println!("No vehicles match these filters.");
    }
    Ok(())
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.catalog)?;
    let id = VehicleId(args.vehicle_id);

    let vehicle = catalog
        .get_vehicle_by_id(&id)?
        .ok_or_else(|| AppError::UnknownVehicle(id.clone()))?;
    let quote = PricingEngine::standard().quote_vehicle(&vehicle, args.deposit, args.term)?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&quote).map_err(std::io::Error::from)?;
        println!("{rendered}");
        return Ok(());
    }

    println!("{} at {}", vehicle.display_name(), format_kes(vehicle.price));
    let range = DepositRange::for_vehicle(&vehicle);
    println!(
        "Deposit range: {} to {} in steps of {}",
        format_kes(range.min),
        format_kes(range.max),
        format_kes(range.step)
    );
    for line in quote_lines(&quote) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn listing_line(listing: &VehicleListing) -> String {
    let vehicle = &listing.vehicle;
    let monthly = listing
        .monthly_from
        .map(|amount| format!(" | from {}/mo", format_kes(amount)))
        .unwrap_or_default();
    format!(
        "- [{}] {} | {} | {} km | {} | {}{}",
        vehicle.id,
        listing.display_name,
        format_kes(vehicle.price),
        vehicle.mileage,
        vehicle.condition.label(),
        vehicle.location,
        monthly
    )
}

pub(crate) fn quote_lines(quote: &HirePurchaseQuote) -> Vec<String> {
    let mut lines = vec![
        format!("Deposit: {}", format_kes(quote.deposit_used)),
        format!("Amount financed: {}", format_kes(quote.principal)),
        format!(
            "Interest: {} over {} months",
            format_kes(quote.total_interest),
            quote.term_months
        ),
        format!("Total payable: {}", format_kes(quote.total_payable)),
        format!("Monthly payment: {}", format_kes(quote.monthly_payment)),
    ];
    lines.extend(quote.warnings.iter().map(|warning| format!("Note: {}", warning.message())));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use konastone::catalog::showroom_inventory;

    #[test]
    fn listing_line_shows_monthly_hint() {
        let prado = showroom_inventory()
            .into_iter()
            .find(|record| record.vehicle.id.0 == "2")
            .expect("prado seeded")
            .vehicle;
        let line = listing_line(&VehicleListing::from_vehicle(prado, &PricingEngine::standard()));
        assert!(line.contains("2020 Toyota Prado TX-L"));
        assert!(line.contains("KES 6,800,000"));
        assert!(line.contains("from KES 180,000/mo"));
    }

    #[test]
    fn quote_lines_surface_clamp_warning() {
        let quote = PricingEngine::standard()
            .quote(2_000_000, 2_500_000, 12)
            .expect("clamped quote");
        let lines = quote_lines(&quote);
        assert!(lines.iter().any(|line| line == "Monthly payment: KES 0"));
        assert!(lines.iter().any(|line| line.starts_with("Note:")));
    }
}
