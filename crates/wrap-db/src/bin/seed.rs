//! # Demo Catalog Seeder
//!
//! Populates a catalog database with a small, realistic wrap catalog for
//! development and demos.
//!
//! ## Usage
//! ```bash
//! # Seed ./wrap_dev.db (skips if vehicles already exist)
//! cargo run -p wrap-db --bin seed
//!
//! # Specify database path, overwrite existing entries with the same ids
//! cargo run -p wrap-db --bin seed -- --db ./data/catalog.db --force
//! ```
//!
//! ## Seeded Catalog
//! - Categories: Compact, Van, Pickup
//! - Vehicles with full / partial coverages and per-vehicle extra options
//! - Print materials: percentage and fixed-amount, some allowing white print
//! - Lamination materials: gloss, matte, anti-graffiti
//! - White print: 12% of base + print

use clap::Parser;
use wrap_core::{
    Amount, CalculationMode, Category, Coverage, ExtraOption, LaminationMaterial, PrintMaterial,
    Vehicle, WhitePrintSettings,
};
use wrap_db::{Database, DbConfig};

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Wrap Quote demo catalog seeder")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./wrap_dev.db")]
    db: String,

    /// Upsert even if the catalog already has vehicles
    #[arg(short, long)]
    force: bool,
}

/// (id, manufacturer, model, category, period, coverages, extra options)
type VehicleSeed = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static [(&'static str, &'static str, f64)],
    &'static [(&'static str, &'static str, f64)],
);

const CATEGORIES: &[(&str, &str)] = &[("compact", "Compact"), ("van", "Van"), ("pickup", "Pickup")];

const VEHICLES: &[VehicleSeed] = &[
    (
        "vw-golf-8",
        "Volkswagen",
        "Golf",
        "compact",
        "2020-2024",
        &[("full", "Full Wrap", 1000.0), ("half", "Half Wrap", 600.0)],
        &[("roof", "Roof", 150.0), ("mirrors", "Mirror Caps", 40.0)],
    ),
    (
        "ford-transit-custom",
        "Ford",
        "Transit Custom",
        "van",
        "2018-2023",
        &[
            ("full", "Full Wrap", 2500.0),
            ("sides", "Sides Only", 1400.0),
            ("rear", "Rear Doors", 450.0),
        ],
        &[("roof", "Roof", 300.0), ("bumpers", "Bumpers", 180.0)],
    ),
    (
        "mb-sprinter",
        "Mercedes-Benz",
        "Sprinter",
        "van",
        "2018-2024",
        &[("full", "Full Wrap", 3200.0), ("sides", "Sides Only", 1800.0)],
        &[("roof", "Roof", 420.0)],
    ),
    (
        "toyota-hilux",
        "Toyota",
        "Hilux",
        "pickup",
        "2016-2024",
        &[("full", "Full Wrap", 2100.0), ("hood", "Hood", 350.0)],
        &[],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 Wrap Quote Catalog Seeder");
    println!("============================");
    println!("Database: {}", args.db);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.vehicles().count().await?;
    if existing > 0 && !args.force {
        println!("⚠ Database already has {} vehicles", existing);
        println!("  Skipping seed. Pass --force to upsert the demo catalog anyway.");
        return Ok(());
    }

    for (id, name) in CATEGORIES {
        db.categories().upsert(&Category::new(*id, *name)).await?;
    }
    println!("✓ {} categories", CATEGORIES.len());

    for vehicle in VEHICLES.iter().map(build_vehicle) {
        if let Err(e) = db.vehicles().upsert(&vehicle).await {
            eprintln!("Failed to upsert {}: {}", vehicle.id, e);
        }
    }
    println!("✓ {} vehicles", db.vehicles().count().await?);

    for material in print_materials() {
        db.materials().upsert_print(&material).await?;
    }
    for material in lamination_materials() {
        db.materials().upsert_lamination(&material).await?;
    }
    println!(
        "✓ {} print / {} lamination materials",
        db.materials().count_print().await?,
        db.materials().count_lamination().await?
    );

    db.settings()
        .set_white_print(&WhitePrintSettings::new(CalculationMode::Percentage, 12.0))
        .await?;
    println!("✓ White print: 12% of base + print");

    let catalog = db.load_catalog().await?;
    println!();
    println!("✓ Seed complete! Catalog has {} vehicles.", catalog.vehicles().count());

    db.close().await;
    Ok(())
}

fn build_vehicle(seed: &VehicleSeed) -> Vehicle {
    let (id, manufacturer, model, category, period, coverages, options) = *seed;

    let vehicle = Vehicle::new(id, manufacturer, model)
        .with_category(category)
        .with_production_period(period);

    let vehicle = coverages.iter().fold(vehicle, |v, (cid, name, price)| {
        v.with_coverage(Coverage::new(*cid, *name, Amount::new(*price)))
    });

    options.iter().fold(vehicle, |v, (oid, name, price)| {
        v.with_extra_option(ExtraOption::new(*oid, *name, Amount::new(*price)))
    })
}

fn print_materials() -> Vec<PrintMaterial> {
    vec![
        PrintMaterial::new("cast-3m", "3M IJ180 Cast", CalculationMode::Percentage, 35.0)
            .with_white_print(true),
        PrintMaterial::new("calendered", "Calendered Vinyl", CalculationMode::Percentage, 20.0),
        PrintMaterial::new("reflective", "Reflective Film", CalculationMode::FixedAmount, 650.0)
            .with_white_print(true),
    ]
}

fn lamination_materials() -> Vec<LaminationMaterial> {
    vec![
        LaminationMaterial::new("gloss", "Gloss Laminate", CalculationMode::Percentage, 10.0),
        LaminationMaterial::new("matte", "Matte Laminate", CalculationMode::Percentage, 12.0),
        LaminationMaterial::new(
            "anti-graffiti",
            "Anti-Graffiti Laminate",
            CalculationMode::FixedAmount,
            400.0,
        ),
    ]
}
