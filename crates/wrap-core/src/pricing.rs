//! # Pricing Engine
//!
//! Turns a [`Selection`] into a [`PriceBreakdown`] against a [`Catalog`].
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. resolve     vehicle → coverage, options (of THAT vehicle)           │
//! │                 print material, lamination material (optional)          │
//! │                                                                         │
//! │  2. base        = coverage.price + Σ option.price                       │
//! │                                                                         │
//! │  3. print       = fixed value        | base × pct                       │
//! │                                                                         │
//! │  4. lamination  = fixed value        | (base + print) × pct             │
//! │                                                                         │
//! │  5. white print = fixed value        | (base + print) × pct             │
//! │     (only if requested AND the print material allows it; never         │
//! │      compounds on top of lamination)                                    │
//! │                                                                         │
//! │  6. total       = base + print + lamination + white print               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No rounding happens here. Lines always add up to the total bit for bit.
//!
//! ## Example
//! ```rust
//! use wrap_core::{compute_price, Amount, CalculationMode, Catalog, Coverage, ExtraOption,
//!     LaminationMaterial, PrintMaterial, Selection, Vehicle, WhitePrintSettings};
//!
//! let catalog = Catalog::default()
//!     .with_vehicle(
//!         Vehicle::new("golf", "Volkswagen", "Golf")
//!             .with_coverage(Coverage::new("full", "Full Wrap", Amount::new(1000.0)))
//!             .with_extra_option(ExtraOption::new("uv", "UV Protection", Amount::new(100.0))),
//!     )
//!     .with_print_material(
//!         PrintMaterial::new("cast", "Cast Vinyl", CalculationMode::Percentage, 20.0)
//!             .with_white_print(true),
//!     )
//!     .with_lamination_material(LaminationMaterial::new(
//!         "gloss", "Gloss Laminate", CalculationMode::Percentage, 10.0,
//!     ))
//!     .with_white_print(WhitePrintSettings::new(CalculationMode::Percentage, 15.0));
//!
//! let selection = Selection::new("golf", "full", "cast")
//!     .with_extra_option("uv")
//!     .with_lamination("gloss")
//!     .with_white_print(true);
//!
//! let breakdown = compute_price(&catalog, &selection).unwrap();
//! assert_eq!(breakdown.total().to_string(), "1650.00");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::amount::Amount;
use crate::catalog::Catalog;
use crate::error::{SelectionError, SelectionField};
use crate::selection::{Selection, SelectionState};
use crate::types::{ExtraOption, RateCard};
use crate::{EXTRA_OPTIONS_LABEL, WHITE_PRINT_LABEL};

// =============================================================================
// Breakdown Types
// =============================================================================

/// Which cost component a breakdown line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Base,
    ExtraOptions,
    Print,
    Lamination,
    WhitePrint,
}

/// One labelled cost component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub kind: LineKind,
    pub label: String,
    pub amount: Amount,
}

impl LineItem {
    fn new(kind: LineKind, label: impl Into<String>, amount: Amount) -> Self {
        LineItem {
            kind,
            label: label.into(),
            amount,
        }
    }
}

/// The ordered cost components of a quote and their sum.
///
/// ## Line Order
/// base, extra options (only if > 0), print (always), lamination (if
/// selected), white print (if applied).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceBreakdown {
    lines: Vec<LineItem>,
    total: Amount,
}

impl PriceBreakdown {
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    /// The line of the given kind, if it was emitted.
    pub fn line(&self, kind: LineKind) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.kind == kind)
    }

    fn amount_of(&self, kind: LineKind) -> Amount {
        self.line(kind).map_or(Amount::zero(), |l| l.amount)
    }

    /// Coverage price plus extra options.
    pub fn base_price(&self) -> Amount {
        self.amount_of(LineKind::Base) + self.amount_of(LineKind::ExtraOptions)
    }

    pub fn extra_options_cost(&self) -> Amount {
        self.amount_of(LineKind::ExtraOptions)
    }

    pub fn print_cost(&self) -> Amount {
        self.amount_of(LineKind::Print)
    }

    /// Zero when no lamination was selected.
    pub fn lamination_cost(&self) -> Amount {
        self.amount_of(LineKind::Lamination)
    }

    /// Zero when white print was not applied.
    pub fn white_print_cost(&self) -> Amount {
        self.amount_of(LineKind::WhitePrint)
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Prices a selection against a catalog snapshot.
///
/// ## Errors
/// `SelectionError { kind: NotFound, field }` for the first reference that
/// does not resolve, checked in this order: vehicle, coverage, extra options,
/// print material, lamination material. Coverage and options are only looked
/// up under the selected vehicle.
pub fn compute_price(
    catalog: &Catalog,
    selection: &Selection,
) -> Result<PriceBreakdown, SelectionError> {
    // Step 1: resolve every reference before computing anything
    let vehicle = catalog
        .vehicle(&selection.vehicle_id)
        .ok_or_else(|| SelectionError::not_found(SelectionField::Vehicle))?;

    let coverage = vehicle
        .coverage(&selection.coverage_id)
        .ok_or_else(|| SelectionError::not_found(SelectionField::Coverage))?;

    let options = selection
        .extra_option_ids
        .iter()
        .enumerate()
        .map(|(index, id)| {
            vehicle.extra_option(id).ok_or_else(|| {
                SelectionError::not_found(SelectionField::ExtraOption {
                    index,
                    id: id.clone(),
                })
            })
        })
        .collect::<Result<Vec<&ExtraOption>, _>>()?;

    let print = catalog
        .print_material(&selection.print_material_id)
        .ok_or_else(|| SelectionError::not_found(SelectionField::PrintMaterial))?;

    let lamination = selection
        .lamination_material_id
        .as_deref()
        .map(|id| {
            catalog
                .lamination_material(id)
                .ok_or_else(|| SelectionError::not_found(SelectionField::LaminationMaterial))
        })
        .transpose()?;

    // Step 2: base vehicle price
    let options_total: Amount = options.iter().map(|o| o.price).sum();
    let base_price = coverage.price + options_total;

    let mut lines = vec![LineItem::new(
        LineKind::Base,
        format!("Base price ({})", coverage.name),
        coverage.price,
    )];
    if options_total.is_positive() {
        lines.push(LineItem::new(
            LineKind::ExtraOptions,
            EXTRA_OPTIONS_LABEL,
            options_total,
        ));
    }

    // Step 3: print, always emitted
    let print_cost = print.cost(base_price);
    lines.push(LineItem::new(LineKind::Print, print.name.clone(), print_cost));

    // Steps 4 and 5 share the same base: base + print, never lamination
    let layered_base = base_price + print_cost;

    let lamination_cost = match lamination {
        Some(material) => {
            let cost = material.cost(layered_base);
            lines.push(LineItem::new(
                LineKind::Lamination,
                material.name.clone(),
                cost,
            ));
            cost
        }
        None => Amount::zero(),
    };

    let white_print_cost = if selection.white_print_requested && print.allows_white_print {
        let cost = catalog.white_print().cost(layered_base);
        lines.push(LineItem::new(LineKind::WhitePrint, WHITE_PRINT_LABEL, cost));
        cost
    } else {
        Amount::zero()
    };

    // Step 6
    let total = base_price + print_cost + lamination_cost + white_print_cost;

    Ok(PriceBreakdown { lines, total })
}

// =============================================================================
// Caller-Side View
// =============================================================================

/// What a configurator shows for the current draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuoteView {
    Priced { breakdown: PriceBreakdown },
    /// Selection incomplete or inconsistent: show a neutral placeholder.
    Placeholder,
}

impl QuoteView {
    pub fn total(&self) -> Option<Amount> {
        match self {
            QuoteView::Priced { breakdown } => Some(breakdown.total()),
            QuoteView::Placeholder => None,
        }
    }
}

/// Prices a draft, hiding any selection error behind a placeholder.
pub fn quote_view(catalog: &Catalog, state: &SelectionState) -> QuoteView {
    state
        .to_selection()
        .and_then(|selection| compute_price(catalog, &selection))
        .map_or(QuoteView::Placeholder, |breakdown| QuoteView::Priced {
            breakdown,
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectionErrorKind;
    use crate::selection::{reduce, SelectionAction};
    use crate::types::{
        CalculationMode, Coverage, LaminationMaterial, PrintMaterial, Vehicle,
        WhitePrintSettings,
    };

    const EPS: f64 = 1e-9;

    fn assert_close(actual: Amount, expected: f64) {
        assert!(
            (actual.value() - expected).abs() < EPS,
            "expected {expected}, got {}",
            actual.value()
        );
    }

    fn catalog() -> Catalog {
        Catalog::default()
            .with_vehicle(
                Vehicle::new("golf", "Volkswagen", "Golf")
                    .with_coverage(Coverage::new("full", "Full Wrap", Amount::new(1000.0)))
                    .with_coverage(Coverage::new("half", "Partial Wrap", Amount::new(500.0)))
                    .with_extra_option(ExtraOption::new("uv", "UV Protection", Amount::new(100.0)))
                    .with_extra_option(ExtraOption::new("free", "Logo Placement", Amount::zero())),
            )
            .with_vehicle(
                Vehicle::new("transit", "Ford", "Transit")
                    .with_coverage(Coverage::new("van-full", "Full Wrap", Amount::new(2500.0)))
                    .with_extra_option(ExtraOption::new("roof", "Roof", Amount::new(300.0))),
            )
            .with_print_material(
                PrintMaterial::new("cast", "Cast Vinyl", CalculationMode::Percentage, 20.0)
                    .with_white_print(true),
            )
            .with_print_material(PrintMaterial::new(
                "calendered",
                "Calendered Vinyl",
                CalculationMode::FixedAmount,
                50.0,
            ))
            .with_lamination_material(LaminationMaterial::new(
                "gloss",
                "Gloss Laminate",
                CalculationMode::Percentage,
                10.0,
            ))
            .with_lamination_material(LaminationMaterial::new(
                "matte",
                "Matte Laminate",
                CalculationMode::FixedAmount,
                80.0,
            ))
            .with_white_print(WhitePrintSettings::new(CalculationMode::Percentage, 15.0))
    }

    fn lines_sum(breakdown: &PriceBreakdown) -> Amount {
        breakdown.lines().iter().map(|l| l.amount).sum()
    }

    #[test]
    fn test_layered_percentage_scenario() {
        let selection = Selection::new("golf", "full", "cast")
            .with_extra_option("uv")
            .with_lamination("gloss")
            .with_white_print(true);

        let breakdown = compute_price(&catalog(), &selection).unwrap();

        assert_close(breakdown.base_price(), 1100.0);
        assert_close(breakdown.print_cost(), 220.0);
        assert_close(breakdown.lamination_cost(), 132.0);
        assert_close(breakdown.white_print_cost(), 198.0);
        assert_close(breakdown.total(), 1650.0);

        let kinds: Vec<LineKind> = breakdown.lines().iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Base,
                LineKind::ExtraOptions,
                LineKind::Print,
                LineKind::Lamination,
                LineKind::WhitePrint,
            ]
        );
        assert_eq!(breakdown.lines()[0].label, "Base price (Full Wrap)");
        assert_eq!(breakdown.lines()[2].label, "Cast Vinyl");
    }

    #[test]
    fn test_fixed_amount_scenario_has_two_lines() {
        let selection = Selection::new("golf", "half", "calendered");

        let breakdown = compute_price(&catalog(), &selection).unwrap();

        assert_eq!(breakdown.lines().len(), 2);
        assert_eq!(breakdown.lines()[0].amount, Amount::new(500.0));
        assert_eq!(breakdown.lines()[1].amount, Amount::new(50.0));
        assert_eq!(breakdown.total(), Amount::new(550.0));
    }

    #[test]
    fn test_coverage_of_other_vehicle_is_rejected() {
        let selection = Selection::new("golf", "van-full", "cast");

        let err = compute_price(&catalog(), &selection).unwrap_err();

        assert_eq!(err.kind, SelectionErrorKind::NotFound);
        assert_eq!(err.field, SelectionField::Coverage);
    }

    #[test]
    fn test_unresolved_references() {
        let catalog = catalog();

        let err = compute_price(&catalog, &Selection::new("polo", "full", "cast")).unwrap_err();
        assert_eq!(err.field, SelectionField::Vehicle);

        let selection = Selection::new("golf", "full", "cast")
            .with_extra_option("uv")
            .with_extra_option("roof");
        let err = compute_price(&catalog, &selection).unwrap_err();
        // BTreeSet order: "roof" < "uv"
        assert_eq!(
            err.field,
            SelectionField::ExtraOption {
                index: 0,
                id: "roof".to_string()
            }
        );

        let err = compute_price(&catalog, &Selection::new("golf", "full", "paper")).unwrap_err();
        assert_eq!(err.field, SelectionField::PrintMaterial);

        let selection = Selection::new("golf", "full", "cast").with_lamination("satin");
        let err = compute_price(&catalog, &selection).unwrap_err();
        assert_eq!(err.field, SelectionField::LaminationMaterial);
    }

    #[test]
    fn test_base_equals_coverage_without_options() {
        for price in [0.0, 0.01, 499.99, 1234.5, 1e7] {
            let catalog = Catalog::default()
                .with_vehicle(
                    Vehicle::new("v", "Make", "Model")
                        .with_coverage(Coverage::new("c", "Cover", Amount::new(price))),
                )
                .with_print_material(PrintMaterial::new(
                    "p",
                    "Print",
                    CalculationMode::Percentage,
                    12.5,
                ));
            let breakdown = compute_price(&catalog, &Selection::new("v", "c", "p")).unwrap();
            assert_eq!(breakdown.base_price(), Amount::new(price));
        }
    }

    #[test]
    fn test_lines_sum_exactly_to_total() {
        let catalog = catalog();
        let selections = [
            Selection::new("golf", "full", "cast"),
            Selection::new("golf", "full", "cast")
                .with_extra_option("uv")
                .with_lamination("gloss")
                .with_white_print(true),
            Selection::new("golf", "half", "calendered")
                .with_extra_option("free")
                .with_lamination("matte")
                .with_white_print(true),
            Selection::new("transit", "van-full", "cast")
                .with_extra_option("roof")
                .with_lamination("matte")
                .with_white_print(true),
        ];

        for selection in &selections {
            let breakdown = compute_price(&catalog, selection).unwrap();
            assert_eq!(
                lines_sum(&breakdown).value().to_bits(),
                breakdown.total().value().to_bits(),
                "lines do not add up for {selection:?}"
            );
        }
    }

    #[test]
    fn test_idempotent() {
        let catalog = catalog();
        let selection = Selection::new("transit", "van-full", "cast")
            .with_extra_option("roof")
            .with_lamination("gloss")
            .with_white_print(true);

        let first = compute_price(&catalog, &selection).unwrap();
        let second = compute_price(&catalog, &selection).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.total().value().to_bits(), second.total().value().to_bits());
    }

    #[test]
    fn test_monotonic_in_option_price() {
        let total_with_option_price = |price: f64| {
            let catalog = catalog().with_vehicle(
                Vehicle::new("golf", "Volkswagen", "Golf")
                    .with_coverage(Coverage::new("full", "Full Wrap", Amount::new(1000.0)))
                    .with_extra_option(ExtraOption::new("uv", "UV Protection", Amount::new(price))),
            );
            let selection = Selection::new("golf", "full", "cast")
                .with_extra_option("uv")
                .with_lamination("gloss")
                .with_white_print(true);
            compute_price(&catalog, &selection).unwrap().total()
        };

        let mut previous = total_with_option_price(0.0);
        for price in [0.5, 10.0, 100.0, 1000.0] {
            let current = total_with_option_price(price);
            assert!(current > previous, "{price}: {current} <= {previous}");
            previous = current;
        }
    }

    #[test]
    fn test_white_print_ignored_when_material_disallows_it() {
        let catalog = catalog();
        let without = Selection::new("golf", "full", "calendered");
        let with = without.clone().with_white_print(true);

        let a = compute_price(&catalog, &without).unwrap();
        let b = compute_price(&catalog, &with).unwrap();

        assert_eq!(a.total(), b.total());
        assert!(b.line(LineKind::WhitePrint).is_none());
        assert!(b.white_print_cost().is_zero());
    }

    #[test]
    fn test_lamination_percentage_includes_print_cost() {
        let lamination_with_print_rate = |rate: f64| {
            let catalog = catalog().with_print_material(PrintMaterial::new(
                "cast",
                "Cast Vinyl",
                CalculationMode::Percentage,
                rate,
            ));
            let selection = Selection::new("golf", "full", "cast").with_lamination("gloss");
            compute_price(&catalog, &selection).unwrap().lamination_cost()
        };

        let low = lamination_with_print_rate(10.0);
        let high = lamination_with_print_rate(30.0);

        // 10% of (1000 + 100) vs 10% of (1000 + 300)
        assert_close(low, 110.0);
        assert_close(high, 130.0);
        assert!(high > low);
    }

    #[test]
    fn test_white_print_does_not_compound_on_lamination() {
        let catalog = catalog();
        let base = Selection::new("golf", "full", "cast").with_white_print(true);

        let without_lamination = compute_price(&catalog, &base).unwrap();
        let with_lamination =
            compute_price(&catalog, &base.clone().with_lamination("matte")).unwrap();

        assert_eq!(
            without_lamination.white_print_cost(),
            with_lamination.white_print_cost()
        );
        // 15% of (1000 + 200)
        assert_close(with_lamination.white_print_cost(), 180.0);
    }

    #[test]
    fn test_zero_options_emit_no_line_but_zero_print_does() {
        let catalog = catalog().with_print_material(PrintMaterial::new(
            "free-print",
            "House Vinyl",
            CalculationMode::FixedAmount,
            0.0,
        ));
        let selection = Selection::new("golf", "full", "free-print").with_extra_option("free");

        let breakdown = compute_price(&catalog, &selection).unwrap();

        assert!(breakdown.line(LineKind::ExtraOptions).is_none());
        let print = breakdown.line(LineKind::Print).unwrap();
        assert!(print.amount.is_zero());
        assert_eq!(print.label, "House Vinyl");
    }

    #[test]
    fn test_quote_view_placeholder_until_complete() {
        let catalog = catalog();
        let state = reduce(
            &SelectionState::default(),
            SelectionAction::SelectVehicle("golf".into()),
        );
        assert_eq!(quote_view(&catalog, &state), QuoteView::Placeholder);

        let state = reduce(&state, SelectionAction::SelectCoverage(Some("full".into())));
        let state = reduce(&state, SelectionAction::SelectPrintMaterial(Some("calendered".into())));
        assert_eq!(quote_view(&catalog, &state).total(), Some(Amount::new(1050.0)));

        // Inconsistent selection also degrades to a placeholder
        let state = reduce(&state, SelectionAction::ToggleExtraOption("roof".into()));
        assert_eq!(quote_view(&catalog, &state), QuoteView::Placeholder);
    }
}
