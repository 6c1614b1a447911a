//! # Quote Records
//!
//! Shapes handed to the collaborators that consume a priced selection.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Selection ──► compute_price ──┬──► QuoteRecord ──► export (tabular)    │
//! │                                └──► CartLine    ──► commerce / order    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both are built only from a selection that prices successfully, so a
//! record never carries a partial breakdown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::amount::Amount;
use crate::catalog::Catalog;
use crate::error::{SelectionError, SelectionField};
use crate::pricing::{compute_price, LineKind, PriceBreakdown};
use crate::selection::Selection;
use crate::types::Vehicle;

// =============================================================================
// Export Row
// =============================================================================

/// One row of a quote export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteRecord {
    pub quote_id: String,
    pub vehicle: String,
    pub coverage: String,
    pub base_price: Amount,
    pub extra_options: Amount,
    pub print: Amount,
    pub lamination: Amount,
    pub white_print: Amount,
    pub total: Amount,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl QuoteRecord {
    /// Column order of [`QuoteRecord::to_row`].
    pub const COLUMNS: [&'static str; 10] = [
        "quote_id",
        "vehicle",
        "coverage",
        "base_price",
        "extra_options",
        "print",
        "lamination",
        "white_print",
        "total",
        "created_at",
    ];

    /// Prices the selection and captures it as an export row.
    pub fn new(catalog: &Catalog, selection: &Selection) -> Result<Self, SelectionError> {
        let breakdown = compute_price(catalog, selection)?;
        let (vehicle, coverage_name) = resolve_names(catalog, selection)?;

        Ok(QuoteRecord {
            quote_id: Uuid::new_v4().to_string(),
            vehicle: vehicle.display_name(),
            coverage: coverage_name,
            // Coverage line only; options have their own column
            base_price: breakdown
                .line(LineKind::Base)
                .map_or(Amount::zero(), |l| l.amount),
            extra_options: breakdown.extra_options_cost(),
            print: breakdown.print_cost(),
            lamination: breakdown.lamination_cost(),
            white_print: breakdown.white_print_cost(),
            total: breakdown.total(),
            created_at: Utc::now(),
        })
    }

    /// Cell values in [`QuoteRecord::COLUMNS`] order, amounts to two decimals.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.quote_id.clone(),
            self.vehicle.clone(),
            self.coverage.clone(),
            self.base_price.to_string(),
            self.extra_options.to_string(),
            self.print.to_string(),
            self.lamination.to_string(),
            self.white_print.to_string(),
            self.total.to_string(),
            self.created_at.to_rfc3339(),
        ]
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// What the commerce integration receives for one configured wrap job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub description: String,
    pub selection: Selection,
    pub total: Amount,
}

impl CartLine {
    /// Prices the selection and describes it for an order system.
    pub fn new(catalog: &Catalog, selection: &Selection) -> Result<Self, SelectionError> {
        let breakdown = compute_price(catalog, selection)?;
        Self::from_breakdown(catalog, selection, &breakdown)
    }

    /// Builds the line from an already computed breakdown of `selection`.
    pub fn from_breakdown(
        catalog: &Catalog,
        selection: &Selection,
        breakdown: &PriceBreakdown,
    ) -> Result<Self, SelectionError> {
        let (vehicle, coverage_name) = resolve_names(catalog, selection)?;

        // "Vehicle - Coverage" followed by every other line label
        let mut parts = vec![format!("{} - {}", vehicle.display_name(), coverage_name)];
        parts.extend(
            breakdown
                .lines()
                .iter()
                .filter(|l| l.kind != LineKind::Base && l.kind != LineKind::ExtraOptions)
                .map(|l| l.label.clone()),
        );

        Ok(CartLine {
            description: parts.join(", "),
            selection: selection.clone(),
            total: breakdown.total(),
        })
    }
}

fn resolve_names<'a>(
    catalog: &'a Catalog,
    selection: &Selection,
) -> Result<(&'a Vehicle, String), SelectionError> {
    let vehicle = catalog
        .vehicle(&selection.vehicle_id)
        .ok_or_else(|| SelectionError::not_found(SelectionField::Vehicle))?;
    let coverage = vehicle
        .coverage(&selection.coverage_id)
        .ok_or_else(|| SelectionError::not_found(SelectionField::Coverage))?;
    Ok((vehicle, coverage.name.clone()))
}

// =============================================================================
// Unit Tests
// =============================================================================
