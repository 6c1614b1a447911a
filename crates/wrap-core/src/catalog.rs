//! # Catalog Snapshot
//!
//! The read-only view of everything a quote can reference.
//!
//! ## Snapshot, Not Live References
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog store (wrap-db)                                                │
//! │       │  load_catalog()                                                 │
//! │       ▼                                                                 │
//! │  Catalog { vehicles, categories, print, lamination, white_print }      │
//! │       │  (owned values, shared behind Arc by callers)                   │
//! │       ▼                                                                 │
//! │  compute_price(&catalog, &selection)  ← same input, same output         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Edits made in the store after a snapshot was taken never leak into a
//! calculation that is using it; the caller reloads a new snapshot instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{
    Category, LaminationMaterial, PrintMaterial, Vehicle, WhitePrintSettings,
};

/// Immutable catalog snapshot keyed by entity id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Catalog {
    vehicles: BTreeMap<String, Vehicle>,
    categories: BTreeMap<String, Category>,
    print_materials: BTreeMap<String, PrintMaterial>,
    lamination_materials: BTreeMap<String, LaminationMaterial>,
    white_print: WhitePrintSettings,
}

impl Catalog {
    /// Builds a snapshot from loaded entity lists.
    ///
    /// A later entry with a duplicate id replaces the earlier one.
    pub fn new(
        vehicles: impl IntoIterator<Item = Vehicle>,
        categories: impl IntoIterator<Item = Category>,
        print_materials: impl IntoIterator<Item = PrintMaterial>,
        lamination_materials: impl IntoIterator<Item = LaminationMaterial>,
        white_print: WhitePrintSettings,
    ) -> Self {
        Catalog {
            vehicles: vehicles.into_iter().map(|v| (v.id.clone(), v)).collect(),
            categories: categories.into_iter().map(|c| (c.id.clone(), c)).collect(),
            print_materials: print_materials
                .into_iter()
                .map(|m| (m.id.clone(), m))
                .collect(),
            lamination_materials: lamination_materials
                .into_iter()
                .map(|m| (m.id.clone(), m))
                .collect(),
            white_print,
        }
    }

    // -------------------------------------------------------------------------
    // Builder helpers (seeding and tests)
    // -------------------------------------------------------------------------

    pub fn with_vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicles.insert(vehicle.id.clone(), vehicle);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.insert(category.id.clone(), category);
        self
    }

    pub fn with_print_material(mut self, material: PrintMaterial) -> Self {
        self.print_materials.insert(material.id.clone(), material);
        self
    }

    pub fn with_lamination_material(mut self, material: LaminationMaterial) -> Self {
        self.lamination_materials.insert(material.id.clone(), material);
        self
    }

    pub fn with_white_print(mut self, settings: WhitePrintSettings) -> Self {
        self.white_print = settings;
        self
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.get(id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.get(id)
    }

    pub fn print_material(&self, id: &str) -> Option<&PrintMaterial> {
        self.print_materials.get(id)
    }

    pub fn lamination_material(&self, id: &str) -> Option<&LaminationMaterial> {
        self.lamination_materials.get(id)
    }

    pub fn white_print(&self) -> &WhitePrintSettings {
        &self.white_print
    }

    // -------------------------------------------------------------------------
    // Listing (sorted by id)
    // -------------------------------------------------------------------------

    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    pub fn print_materials(&self) -> impl Iterator<Item = &PrintMaterial> {
        self.print_materials.values()
    }

    pub fn lamination_materials(&self) -> impl Iterator<Item = &LaminationMaterial> {
        self.lamination_materials.values()
    }

    /// Vehicles assigned to the given category.
    pub fn vehicles_in_category<'a>(
        &'a self,
        category_id: &'a str,
    ) -> impl Iterator<Item = &'a Vehicle> + 'a {
        self.vehicles
            .values()
            .filter(move |v| v.category_id.as_deref() == Some(category_id))
    }

    /// Ids of all lamination materials, for the selection reducer.
    pub fn lamination_ids(&self) -> Vec<String> {
        self.lamination_materials.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
            && self.categories.is_empty()
            && self.print_materials.is_empty()
            && self.lamination_materials.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CalculationMode;

    fn sample() -> Catalog {
        Catalog::default()
            .with_category(Category::new("van", "Van"))
            .with_vehicle(Vehicle::new("transit", "Ford", "Transit").with_category("van"))
            .with_vehicle(Vehicle::new("golf", "Volkswagen", "Golf"))
            .with_print_material(PrintMaterial::new(
                "cast",
                "Cast Vinyl",
                CalculationMode::Percentage,
                20.0,
            ))
            .with_lamination_material(LaminationMaterial::new(
                "matte",
                "Matte Laminate",
                CalculationMode::Percentage,
                10.0,
            ))
    }

    #[test]
    fn test_lookups() {
        let catalog = sample();
        assert!(catalog.vehicle("golf").is_some());
        assert!(catalog.vehicle("polo").is_none());
        assert!(catalog.print_material("cast").is_some());
        assert!(catalog.lamination_material("cast").is_none());
        assert_eq!(catalog.category("van").map(|c| c.name.as_str()), Some("Van"));
    }

    #[test]
    fn test_vehicles_in_category() {
        let catalog = sample();
        let vans: Vec<_> = catalog.vehicles_in_category("van").map(|v| v.id.as_str()).collect();
        assert_eq!(vans, vec!["transit"]);
    }

    #[test]
    fn test_new_replaces_duplicate_ids() {
        let catalog = Catalog::new(
            vec![
                Vehicle::new("golf", "Volkswagen", "Golf"),
                Vehicle::new("golf", "Volkswagen", "Golf Variant"),
            ],
            Vec::new(),
            Vec::new(),
            Vec::new(),
            WhitePrintSettings::default(),
        );
        assert_eq!(catalog.vehicles().count(), 1);
        assert_eq!(catalog.vehicle("golf").map(|v| v.model.as_str()), Some("Golf Variant"));
    }

    #[test]
    fn test_empty() {
        assert!(Catalog::default().is_empty());
        assert!(!sample().is_empty());
        assert_eq!(sample().lamination_ids(), vec!["matte".to_string()]);
    }
}
