//! # Repository Module
//!
//! Catalog repositories for Wrap Quote.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI command                                                           │
//! │       │  db.vehicles().upsert(&vehicle)                                 │
//! │       ▼                                                                 │
//! │  VehicleRepository                                                     │
//! │  ├── validate_vehicle(&vehicle)   ← wrap-core rules, before any SQL    │
//! │  ├── list / get_by_id / count                                          │
//! │  └── upsert / delete                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (rows) ──► FromRow structs ──► wrap-core types                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`](category::CategoryRepository) - Vehicle categories
//! - [`VehicleRepository`](vehicle::VehicleRepository) - Vehicles with coverages and extra options
//! - [`MaterialRepository`](material::MaterialRepository) - Print and lamination materials
//! - [`SettingsRepository`](settings::SettingsRepository) - White-print surcharge

use uuid::Uuid;

pub mod category;
pub mod material;
pub mod settings;
pub mod vehicle;

/// Generates an id for a new catalog entity.
///
/// ## Usage
/// ```rust,ignore
/// let vehicle = Vehicle::new(generate_id(), "Ford", "Transit");
/// ```
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
