use crate::infra::{load_catalog, InMemoryLeadRepository};
use crate::inventory::{listing_line, quote_lines};
use chrono::{Days, Local, NaiveDate};
use clap::Args;
use konastone::catalog::router::VehicleListing;
use konastone::catalog::{
    CatalogFilter, CatalogMode, CatalogSource, FilterCriteria, InMemoryCatalog, Vehicle,
    VehicleId,
};
use konastone::config::AppConfig;
use konastone::error::AppError;
use konastone::leads::{
    BookingLocation, ContactDetails, EmploymentStatus, FinanceApplication, LeadService,
    TestDriveBooking,
};
use konastone::pricing::{format_kes, PricingEngine, RepaymentTerm};
use konastone::session::{SavedApplication, SessionContext, SessionUser};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for bookings (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Vehicle to price and apply for. Defaults to the first hire-purchase listing.
    #[arg(long)]
    pub(crate) vehicle_id: Option<String>,
    /// Skip the lead capture portion of the demo.
    #[arg(long)]
    pub(crate) skip_leads: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        vehicle_id,
        skip_leads,
    } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let config = AppConfig::load()?;
    let catalog = Arc::new(load_catalog(&config.catalog)?);
    let engine = PricingEngine::standard();
    let vehicles = catalog.list_available_vehicles()?;

    println!("Konastone Autos storefront demo ({today})");
    render_mode(&vehicles, CatalogMode::Buy, &engine);
    render_mode(&vehicles, CatalogMode::Hire, &engine);

    let hire_stock = CatalogFilter::apply(&vehicles, &FilterCriteria::for_mode(CatalogMode::Hire));
    let vehicle = match vehicle_id {
        Some(id) => {
            let id = VehicleId(id);
            catalog
                .get_vehicle_by_id(&id)?
                .ok_or(AppError::UnknownVehicle(id))?
        }
        None => match hire_stock.into_iter().next() {
            Some(vehicle) => vehicle,
            None => {
                println!("\nNo hire-purchase stock to price.");
                return Ok(());
            }
        },
    };

    println!("\nHire-purchase calculator: {}", vehicle.display_name());
    println!("Term comparison at the minimum deposit:");
    for term in RepaymentTerm::ordered() {
        match engine.quote_vehicle(&vehicle, None, Some(term.months())) {
            Ok(quote) => println!(
                "  - {}: {}/mo, {} total",
                term.label(),
                format_kes(quote.monthly_payment),
                format_kes(quote.total_payable)
            ),
            Err(err) => println!("  - {}: {}", term.label(), err),
        }
    }

    let over_deposit = i64::try_from(vehicle.price).unwrap_or(i64::MAX).saturating_add(250_000);
    if let Ok(quote) = engine.quote_vehicle(&vehicle, Some(over_deposit), Some(12)) {
        println!("Deposit above the price:");
        for line in quote_lines(&quote) {
            println!("  {line}");
        }
    }

    if skip_leads {
        return Ok(());
    }

    demo_lead_capture(catalog, &vehicle, today)
}

fn render_mode(vehicles: &[Vehicle], mode: CatalogMode, engine: &PricingEngine) {
    let criteria = FilterCriteria::storefront_defaults(mode);
    let listings: Vec<VehicleListing> = CatalogFilter::apply(vehicles, &criteria)
        .into_iter()
        .map(|vehicle| VehicleListing::from_vehicle(vehicle, engine))
        .collect();

    println!("\n{} ({} vehicles)", mode.label(), listings.len());
    for listing in &listings {
        println!("{}", listing_line(listing));
    }
}

fn demo_lead_capture(
    catalog: Arc<InMemoryCatalog>,
    vehicle: &Vehicle,
    today: NaiveDate,
) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryLeadRepository::default());
    let service = LeadService::new(repository.clone(), catalog);
    let contact = ContactDetails {
        full_name: "Amani Wekesa".to_string(),
        phone: "0712345678".to_string(),
        email: Some("amani@example.co.ke".to_string()),
    };

    let mut session = SessionContext::new();
    session.login(SessionUser {
        name: contact.full_name.clone(),
        email: "amani@example.co.ke".to_string(),
        avatar: None,
    });
    session.add_favorite(vehicle.id.clone());

    println!("\nLead capture (contact details withheld)");
    let booking = TestDriveBooking {
        vehicle_id: vehicle.id.clone(),
        contact: contact.clone(),
        preferred_date: today.checked_add_days(Days::new(3)).unwrap_or(today),
        preferred_time: "11:00".to_string(),
        location: BookingLocation::Showroom,
        notes: None,
    };
    match service.submit_test_drive(booking, today) {
        Ok(record) => print_status(&record),
        Err(err) => println!("  Test drive rejected: {err}"),
    }

    let application = FinanceApplication {
        vehicle_id: vehicle.id.clone(),
        contact,
        national_id: "29384756".to_string(),
        kra_pin: "A123456789B".to_string(),
        monthly_income: 250_000,
        employment_status: EmploymentStatus::Employed,
        existing_loans: false,
        deposit_amount: vehicle.min_deposit.unwrap_or(0),
        repayment_period: RepaymentTerm::Months48.months(),
    };
    match service.submit_finance_application(application, today) {
        Ok(record) => {
            print_status(&record);
            if let Some(quote) = record.quote.as_ref() {
                match SavedApplication::from_quote(record.id.0.clone(), vehicle, quote, today) {
                    Ok(saved) => session.add_finance_application(saved),
                    Err(err) => println!("  Session not updated: {err}"),
                }
            }
        }
        Err(err) => println!("  Finance application rejected: {err}"),
    }

    println!(
        "Session: {} favorites, {} finance applications, {} leads stored",
        session.favorites().len(),
        session.finance_applications().len(),
        repository.len()
    );
    Ok(())
}

fn print_status(record: &konastone::leads::LeadRecord) {
    match serde_json::to_string_pretty(&record.status_view()) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("  Status payload unavailable: {err}"),
    }
}
