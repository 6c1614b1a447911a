//! # Domain Types
//!
//! Catalog entities used throughout Wrap Quote.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐      ┌─────────────────┐   ┌─────────────────┐    │
//! │  │    Vehicle      │ 1──* │    Coverage     │   │ PrintMaterial   │    │
//! │  │  ─────────────  │      │  id, name,price │   │  mode, value    │    │
//! │  │  id             │      └─────────────────┘   │  white print?   │    │
//! │  │  manufacturer   │      ┌─────────────────┐   └─────────────────┘    │
//! │  │  model          │ 1──* │  ExtraOption    │   ┌─────────────────┐    │
//! │  │  category_id ───┼──┐   │  id, name,price │   │LaminationMat.   │    │
//! │  │  period         │  │   └─────────────────┘   │  mode, value    │    │
//! │  └─────────────────┘  │   ┌─────────────────┐   └─────────────────┘    │
//! │                       └──►│    Category     │   ┌─────────────────┐    │
//! │                           └─────────────────┘   │WhitePrintSetting│    │
//! │                                                 │ (global single) │    │
//! │                                                 └─────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Coverage and option order is display order only; lookups are by id.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::amount::Amount;

// =============================================================================
// Calculation Mode
// =============================================================================

/// How a material (or the white-print surcharge) is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// `value` is percentage points of a base amount.
    Percentage,
    /// `value` is a currency amount, independent of any base.
    FixedAmount,
}

impl CalculationMode {
    /// Prices `value` under this mode against `base`.
    ///
    /// ## Example
    /// ```rust
    /// use wrap_core::{Amount, CalculationMode};
    ///
    /// let base = Amount::new(1000.0);
    /// assert_eq!(CalculationMode::FixedAmount.apply(50.0, base), Amount::new(50.0));
    /// assert_eq!(CalculationMode::Percentage.apply(5.0, base), Amount::new(50.0));
    /// ```
    pub fn apply(self, value: f64, base: Amount) -> Amount {
        match self {
            CalculationMode::FixedAmount => Amount::new(value),
            CalculationMode::Percentage => base.percent(value),
        }
    }
}

impl Default for CalculationMode {
    fn default() -> Self {
        CalculationMode::Percentage
    }
}

/// Anything priced as "mode + value" against a running subtotal.
pub trait RateCard {
    fn mode(&self) -> CalculationMode;
    fn rate(&self) -> f64;

    /// The surcharge this rate adds on top of `base`.
    fn cost(&self, base: Amount) -> Amount {
        self.mode().apply(self.rate(), base)
    }
}

// =============================================================================
// Category
// =============================================================================

/// A vehicle category (e.g. "Van", "Truck", "Compact").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }
}

// =============================================================================
// Coverage & Extra Option
// =============================================================================

/// One priceable wrap variant of a vehicle ("Full Wrap", "Partial Wrap").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coverage {
    pub id: String,
    pub name: String,
    pub price: Amount,
}

impl Coverage {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Amount) -> Self {
        Coverage {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// An add-on priced additively on top of the coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtraOption {
    pub id: String,
    pub name: String,
    pub price: Amount,
}

impl ExtraOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Amount) -> Self {
        ExtraOption {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

// =============================================================================
// Vehicle
// =============================================================================

/// A vehicle model that can be wrapped.
///
/// Owns its coverages and extra options: a selection may only reference
/// variants of the vehicle it selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Vehicle {
    /// Empty in import rows that carry no id.
    #[serde(default)]
    pub id: String,
    pub manufacturer: String,
    pub model: String,
    pub category_id: Option<String>,
    /// Free-form label such as "2019-2023".
    pub production_period: Option<String>,
    #[serde(default)]
    pub coverages: Vec<Coverage>,
    #[serde(default)]
    pub extra_options: Vec<ExtraOption>,
}

impl Vehicle {
    /// Creates a vehicle without category, period or variants.
    pub fn new(
        id: impl Into<String>,
        manufacturer: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Vehicle {
            id: id.into(),
            manufacturer: manufacturer.into(),
            model: model.into(),
            category_id: None,
            production_period: None,
            coverages: Vec::new(),
            extra_options: Vec::new(),
        }
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_production_period(mut self, period: impl Into<String>) -> Self {
        self.production_period = Some(period.into());
        self
    }

    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverages.push(coverage);
        self
    }

    pub fn with_extra_option(mut self, option: ExtraOption) -> Self {
        self.extra_options.push(option);
        self
    }

    /// Finds one of this vehicle's coverages by id.
    pub fn coverage(&self, id: &str) -> Option<&Coverage> {
        self.coverages.iter().find(|c| c.id == id)
    }

    /// Finds one of this vehicle's extra options by id.
    pub fn extra_option(&self, id: &str) -> Option<&ExtraOption> {
        self.extra_options.iter().find(|o| o.id == id)
    }

    /// "Manufacturer Model (period)" as shown in lists and export rows.
    pub fn display_name(&self) -> String {
        match &self.production_period {
            Some(period) if !period.trim().is_empty() => {
                format!("{} {} ({})", self.manufacturer, self.model, period.trim())
            }
            _ => format!("{} {}", self.manufacturer, self.model),
        }
    }
}

// =============================================================================
// Materials
// =============================================================================

/// The vinyl/print substrate. Exactly one per quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PrintMaterial {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub mode: CalculationMode,
    /// Percentage points or currency amount, depending on `mode`.
    pub value: f64,
    pub allows_white_print: bool,
}

impl PrintMaterial {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mode: CalculationMode,
        value: f64,
    ) -> Self {
        PrintMaterial {
            id: id.into(),
            name: name.into(),
            mode,
            value,
            allows_white_print: false,
        }
    }

    pub fn with_white_print(mut self, allowed: bool) -> Self {
        self.allows_white_print = allowed;
        self
    }
}

impl RateCard for PrintMaterial {
    fn mode(&self) -> CalculationMode {
        self.mode
    }

    fn rate(&self) -> f64 {
        self.value
    }
}

/// A protective overlay. Zero or one per quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LaminationMaterial {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub mode: CalculationMode,
    pub value: f64,
}

impl LaminationMaterial {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mode: CalculationMode,
        value: f64,
    ) -> Self {
        LaminationMaterial {
            id: id.into(),
            name: name.into(),
            mode,
            value,
        }
    }
}

impl RateCard for LaminationMaterial {
    fn mode(&self) -> CalculationMode {
        self.mode
    }

    fn rate(&self) -> f64 {
        self.value
    }
}

// =============================================================================
// White Print Settings
// =============================================================================

/// The global white-ink surcharge.
///
/// Only charged when the print material allows white print AND the
/// customer asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WhitePrintSettings {
    pub mode: CalculationMode,
    pub value: f64,
}

impl WhitePrintSettings {
    pub fn new(mode: CalculationMode, value: f64) -> Self {
        WhitePrintSettings { mode, value }
    }
}

/// No surcharge until configured.
impl Default for WhitePrintSettings {
    fn default() -> Self {
        WhitePrintSettings {
            mode: CalculationMode::Percentage,
            value: 0.0,
        }
    }
}

impl RateCard for WhitePrintSettings {
    fn mode(&self) -> CalculationMode {
        self.mode
    }

    fn rate(&self) -> f64 {
        self.value
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculation_mode_serde_names() {
        let json = serde_json::to_string(&CalculationMode::FixedAmount).unwrap();
        assert_eq!(json, "\"fixed_amount\"");

        let mode: CalculationMode = serde_json::from_str("\"percentage\"").unwrap();
        assert_eq!(mode, CalculationMode::Percentage);
    }

    #[test]
    fn test_rate_card_cost() {
        let lamination =
            LaminationMaterial::new("gloss", "Gloss Laminate", CalculationMode::FixedAmount, 75.0);
        assert_eq!(lamination.cost(Amount::new(9999.0)), Amount::new(75.0));

        let white = WhitePrintSettings::new(CalculationMode::Percentage, 50.0);
        assert_eq!(white.cost(Amount::new(200.0)), Amount::new(100.0));
    }

    #[test]
    fn test_vehicle_lookups() {
        let vehicle = Vehicle::new("sprinter", "Mercedes-Benz", "Sprinter")
            .with_coverage(Coverage::new("full", "Full Wrap", Amount::new(2400.0)))
            .with_coverage(Coverage::new("half", "Half Wrap", Amount::new(1300.0)))
            .with_extra_option(ExtraOption::new("roof", "Roof", Amount::new(350.0)));

        assert_eq!(vehicle.coverage("half").map(|c| c.name.as_str()), Some("Half Wrap"));
        assert!(vehicle.coverage("roof").is_none());
        assert!(vehicle.extra_option("roof").is_some());
        assert!(vehicle.extra_option("full").is_none());
    }

    #[test]
    fn test_vehicle_display_name() {
        let vehicle = Vehicle::new("golf", "Volkswagen", "Golf");
        assert_eq!(vehicle.display_name(), "Volkswagen Golf");

        let vehicle = vehicle.with_production_period(" 2020-2024 ");
        assert_eq!(vehicle.display_name(), "Volkswagen Golf (2020-2024)");
    }

    #[test]
    fn test_white_print_default_is_free() {
        let settings = WhitePrintSettings::default();
        assert_eq!(settings.mode, CalculationMode::Percentage);
        assert!(settings.cost(Amount::new(1000.0)).is_zero());
    }
}
