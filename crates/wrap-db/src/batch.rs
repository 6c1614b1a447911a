//! # Catalog Batches
//!
//! A set of catalog rows that is checked as a whole and then written in a
//! single transaction.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogBatch                                                           │
//! │       │                                                                 │
//! │       ├── validate()      every row, before any write                  │
//! │       │                                                                 │
//! │       └── Database::write_batch()                                      │
//! │              BEGIN                                                      │
//! │                categories → vehicles → print → lamination → white print │
//! │              COMMIT        (any error: nothing is kept)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Categories go first so vehicles in the same batch can reference them.

use chrono::Utc;
use tracing::info;

use wrap_core::validation::{
    validate_category, validate_lamination_material, validate_print_material,
    validate_vehicle, validate_white_print, ValidationResult,
};
use wrap_core::{Category, LaminationMaterial, PrintMaterial, Vehicle, WhitePrintSettings};

use crate::error::DbResult;
use crate::pool::Database;
use crate::repository::category::write_category;
use crate::repository::material::{write_lamination_material, write_print_material};
use crate::repository::settings::write_white_print;
use crate::repository::vehicle::write_vehicle;

/// Catalog rows with their final ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogBatch {
    pub categories: Vec<Category>,
    pub vehicles: Vec<Vehicle>,
    pub print_materials: Vec<PrintMaterial>,
    pub lamination_materials: Vec<LaminationMaterial>,
    pub white_print: Option<WhitePrintSettings>,
}

impl CatalogBatch {
    /// Runs the catalog validators over every row, stopping at the first
    /// failure.
    pub fn validate(&self) -> ValidationResult<()> {
        self.categories.iter().try_for_each(validate_category)?;
        self.vehicles.iter().try_for_each(validate_vehicle)?;
        self.print_materials
            .iter()
            .try_for_each(validate_print_material)?;
        self.lamination_materials
            .iter()
            .try_for_each(validate_lamination_material)?;
        self.white_print.as_ref().map_or(Ok(()), validate_white_print)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.vehicles.is_empty()
            && self.print_materials.is_empty()
            && self.lamination_materials.is_empty()
            && self.white_print.is_none()
    }
}

impl Database {
    /// Validates the batch, then upserts all of it in one transaction.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - A row breaks a catalog rule; nothing written
    /// * `Err(DbError::UnknownCategory)` - A vehicle names a category that is
    ///   neither stored nor in the batch; the transaction is rolled back
    pub async fn write_batch(&self, batch: &CatalogBatch) -> DbResult<()> {
        batch.validate()?;

        let now = Utc::now();
        let mut tx = self.pool().begin().await?;

        for category in &batch.categories {
            write_category(&mut *tx, category, now).await?;
        }
        for vehicle in &batch.vehicles {
            write_vehicle(&mut *tx, vehicle, now).await?;
        }
        for material in &batch.print_materials {
            write_print_material(&mut *tx, material, now).await?;
        }
        for material in &batch.lamination_materials {
            write_lamination_material(&mut *tx, material, now).await?;
        }
        if let Some(settings) = &batch.white_print {
            write_white_print(&mut *tx, settings, now).await?;
        }

        tx.commit().await?;

        info!(
            categories = batch.categories.len(),
            vehicles = batch.vehicles.len(),
            print_materials = batch.print_materials.len(),
            lamination_materials = batch.lamination_materials.len(),
            white_print = batch.white_print.is_some(),
            "Catalog batch written"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
