use std::collections::BTreeSet;

use super::domain::{
    Category, Condition, FuelType, StockRecord, StockStatus, Transmission, Vehicle, VehicleId,
};

struct SeedVehicle {
    id: &'static str,
    make: &'static str,
    model: &'static str,
    year: i32,
    price: u64,
    mileage: u64,
    image: &'static str,
    category: Category,
    fuel_type: FuelType,
    condition: Condition,
    location: &'static str,
    min_deposit: Option<u64>,
    monthly_hint: Option<u64>,
    features: &'static [&'static str],
}

const SHOWROOM: &[SeedVehicle] = &[
    SeedVehicle {
        id: "1",
        make: "Mercedes-Benz",
        model: "C-Class C200",
        year: 2018,
        price: 3_500_000,
        mileage: 45_000,
        image: "/images/mercedes-c200.jpg",
        category: Category::Sedan,
        fuel_type: FuelType::Petrol,
        condition: Condition::Used,
        location: "Nairobi",
        min_deposit: Some(700_000),
        monthly_hint: Some(95_000),
        features: &["Leather seats", "Reverse camera", "Sunroof"],
    },
    SeedVehicle {
        id: "2",
        make: "Toyota",
        model: "Prado TX-L",
        year: 2020,
        price: 6_800_000,
        mileage: 28_000,
        image: "/images/prado-txl.jpg",
        category: Category::Suv,
        fuel_type: FuelType::Diesel,
        condition: Condition::Used,
        location: "Nairobi",
        min_deposit: Some(1_500_000),
        monthly_hint: Some(180_000),
        features: &["7 seats", "4WD", "Cruise control"],
    },
    SeedVehicle {
        id: "3",
        make: "Volkswagen",
        model: "Golf GTI",
        year: 2017,
        price: 2_400_000,
        mileage: 62_000,
        image: "/images/golf-gti.jpg",
        category: Category::Hatchback,
        fuel_type: FuelType::Petrol,
        condition: Condition::Local,
        location: "Mombasa",
        min_deposit: Some(500_000),
        monthly_hint: Some(65_000),
        features: &["Sport seats", "Paddle shifters"],
    },
    SeedVehicle {
        id: "4",
        make: "Mazda",
        model: "CX-5",
        year: 2019,
        price: 3_200_000,
        mileage: 35_000,
        image: "/images/mazda-cx5.jpg",
        category: Category::Suv,
        fuel_type: FuelType::Diesel,
        condition: Condition::Used,
        location: "Nairobi",
        min_deposit: Some(800_000),
        monthly_hint: Some(88_000),
        features: &["Lane keep assist", "Bose audio"],
    },
    SeedVehicle {
        id: "5",
        make: "Subaru",
        model: "Outback",
        year: 2016,
        price: 2_100_000,
        mileage: 85_000,
        image: "/images/subaru-outback.jpg",
        category: Category::Suv,
        fuel_type: FuelType::Petrol,
        condition: Condition::Local,
        location: "Nakuru",
        min_deposit: None,
        monthly_hint: None,
        features: &["AWD", "Roof rails"],
    },
    SeedVehicle {
        id: "6",
        make: "Land Rover",
        model: "Discovery Sport",
        year: 2018,
        price: 4_500_000,
        mileage: 55_000,
        image: "/images/disco-sport.jpg",
        category: Category::Suv,
        fuel_type: FuelType::Diesel,
        condition: Condition::Used,
        location: "Nairobi",
        min_deposit: Some(1_200_000),
        monthly_hint: Some(125_000),
        features: &["Panoramic roof", "Terrain response"],
    },
];

/// Showroom stock served when no inventory export is configured.
pub fn showroom_inventory() -> Vec<StockRecord> {
    SHOWROOM
        .iter()
        .map(|seed| StockRecord {
            vehicle: Vehicle {
                id: VehicleId(seed.id.to_string()),
                make: seed.make.to_string(),
                model: seed.model.to_string(),
                year: seed.year,
                price: seed.price,
                mileage: seed.mileage,
                category: seed.category,
                fuel_type: seed.fuel_type,
                transmission: Transmission::Automatic,
                condition: seed.condition,
                location: seed.location.to_string(),
                images: vec![seed.image.to_string()],
                features: seed
                    .features
                    .iter()
                    .map(|feature| feature.to_string())
                    .collect::<BTreeSet<_>>(),
                description: String::new(),
                hire_purchase_available: seed.min_deposit.is_some(),
                min_deposit: seed.min_deposit,
                monthly_payment_hint: seed.monthly_hint,
            },
            status: StockStatus::Available,
        })
        .collect()
}
