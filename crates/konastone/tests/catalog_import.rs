use std::io::Cursor;

use konastone::catalog::{
    CatalogSource, InMemoryCatalog, InventoryImportError, InventoryImporter, RowError,
    StockStatus, VehicleId, PLACEHOLDER_IMAGE,
};
use konastone::pricing::PricingEngine;

const EXPORT: &str = "\
id,make,model,year,price,mileage,category,fuel_type,transmission,condition,location,status,hire_purchase,min_deposit,monthly_hint,images,features,description
11,Nissan,X-Trail,2019,2950000,51000,suv,petrol,automatic,used,Nairobi,available,yes,600000,,/img/xtrail-1.jpg|/img/xtrail-2.jpg,7 seats|Sunroof,\"Clean, accident free\"
12,Isuzu,D-Max,2021,4100000,30000,truck,diesel,manual,local,Eldoret,sold,no,,,,,
13,Honda,Fit Hybrid,2017,1250000,74000,hatchback,hybrid,automatic,used,Kisumu,,Y,\"250,000\",41000,,,
";

fn import(csv: &str) -> Result<Vec<konastone::catalog::StockRecord>, InventoryImportError> {
    InventoryImporter::from_reader(Cursor::new(csv.as_bytes().to_vec()), 2026)
}

#[test]
fn export_populates_the_catalog() {
    let records = import(EXPORT).expect("export imports");
    assert_eq!(records.len(), 3);

    let xtrail = &records[0].vehicle;
    assert_eq!(xtrail.images.len(), 2);
    assert_eq!(xtrail.description, "Clean, accident free");
    assert!(xtrail.features.contains("Sunroof"));

    let catalog = InMemoryCatalog::new(records);
    let listed = catalog.list_available_vehicles().expect("listing");
    let ids: Vec<&str> = listed.iter().map(|vehicle| vehicle.id.0.as_str()).collect();
    assert_eq!(ids, vec!["11", "13"]);

    let sold = catalog
        .get_vehicle_by_id(&VehicleId("12".to_string()))
        .expect("lookup")
        .expect("sold stock stays addressable");
    assert_eq!(sold.images, vec![PLACEHOLDER_IMAGE.to_string()]);
}

#[test]
fn monthly_hint_overrides_computed_figure() {
    let records = import(EXPORT).expect("export imports");
    let engine = PricingEngine::standard();

    let fit = &records[2];
    assert_eq!(fit.status, StockStatus::Available);
    assert_eq!(fit.vehicle.min_deposit, Some(250_000));
    assert_eq!(engine.monthly_display(&fit.vehicle), Some(41_000));

    let xtrail = &records[0].vehicle;
    let computed = engine
        .quote_vehicle(xtrail, None, None)
        .expect("quote")
        .monthly_payment;
    assert_eq!(engine.monthly_display(xtrail), Some(computed));
}

#[test]
fn unknown_flag_names_the_line() {
    let csv = "\
id,make,model,year,price,mileage,category,fuel_type,transmission,condition,location,status,hire_purchase,min_deposit,monthly_hint,images,features,description
21,Toyota,Axio,2016,1300000,88000,sedan,petrol,automatic,used,Nairobi,,maybe,,,,,
";
    match import(csv) {
        Err(InventoryImportError::Row {
            line,
            reason: RowError::InvalidFlag(flag),
        }) => {
            assert_eq!(line, 2);
            assert_eq!(flag, "maybe");
        }
        other => panic!("expected flag error, got {other:?}"),
    }
}

#[test]
fn future_model_years_are_rejected() {
    let csv = "\
id,make,model,year,price,mileage,category,fuel_type,transmission,condition,location,status,hire_purchase,min_deposit,monthly_hint,images,features,description
31,Toyota,Crown,2030,9000000,0,sedan,hybrid,automatic,new,Nairobi,,no,,,,,
";
    assert!(matches!(
        import(csv),
        Err(InventoryImportError::Row {
            reason: RowError::Invariant(_),
            ..
        })
    ));
}
