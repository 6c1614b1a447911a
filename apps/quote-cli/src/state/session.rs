//! # Quote Session
//!
//! Drives a draft selection through reducer actions against one catalog
//! snapshot, repricing after every action.
//!
//! ```text
//! action ──► reduce(state, action) ──► quote_view(catalog, state) ──► view
//!                                             │
//!                                  Priced { breakdown } | Placeholder
//! ```

use std::sync::Arc;

use tracing::debug;
use wrap_core::{
    compute_price, quote_view, reduce, CartLine, Catalog, PriceBreakdown, QuoteView,
    SelectionAction, SelectionError, SelectionState,
};

#[derive(Debug, Clone)]
pub struct QuoteSession {
    catalog: Arc<Catalog>,
    state: SelectionState,
    view: QuoteView,
}

impl QuoteSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        QuoteSession {
            catalog,
            state: SelectionState::default(),
            view: QuoteView::Placeholder,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The price shown for the current draft.
    pub fn view(&self) -> &QuoteView {
        &self.view
    }

    /// Applies one action and reprices.
    pub fn apply(&mut self, action: SelectionAction) -> &QuoteView {
        debug!(?action, "Applying selection action");

        self.state = reduce(&self.state, action);
        self.view = quote_view(&self.catalog, &self.state);

        debug!(total = ?self.view.total(), "Repriced");
        &self.view
    }

    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = SelectionAction>) -> &QuoteView {
        for action in actions {
            self.apply(action);
        }
        &self.view
    }

    /// Swaps in a newer snapshot.
    ///
    /// A selected lamination that the new snapshot no longer offers is
    /// cleared before repricing.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) -> &QuoteView {
        self.catalog = catalog;
        let offered = self.catalog.lamination_ids();
        self.apply(SelectionAction::LaminationOptionsChanged(offered))
    }

    /// Prices the draft, reporting why it can't be priced.
    pub fn price(&self) -> Result<PriceBreakdown, SelectionError> {
        let selection = self.state.to_selection()?;
        compute_price(&self.catalog, &selection)
    }

    pub fn cart_line(&self) -> Result<CartLine, SelectionError> {
        let selection = self.state.to_selection()?;
        let breakdown = compute_price(&self.catalog, &selection)?;
        CartLine::from_breakdown(&self.catalog, &selection, &breakdown)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wrap_core::{
        Amount, CalculationMode, Coverage, ExtraOption, LaminationMaterial, PrintMaterial,
        SelectionErrorKind, SelectionField, Vehicle, WhitePrintSettings,
    };

    fn catalog() -> Catalog {
        Catalog::default()
            .with_vehicle(
                Vehicle::new("golf", "Volkswagen", "Golf")
                    .with_coverage(Coverage::new("full", "Full Wrap", Amount::new(1000.0)))
                    .with_extra_option(ExtraOption::new("roof", "Roof", Amount::new(200.0))),
            )
            .with_vehicle(
                Vehicle::new("polo", "Volkswagen", "Polo")
                    .with_coverage(Coverage::new("full", "Full Wrap", Amount::new(800.0))),
            )
            .with_print_material(
                PrintMaterial::new("cast", "Cast Vinyl", CalculationMode::Percentage, 50.0)
                    .with_white_print(true),
            )
            .with_lamination_material(LaminationMaterial::new(
                "gloss",
                "Gloss Laminate",
                CalculationMode::FixedAmount,
                100.0,
            ))
            .with_white_print(WhitePrintSettings::new(CalculationMode::FixedAmount, 50.0))
    }

    fn session() -> QuoteSession {
        QuoteSession::new(Arc::new(catalog()))
    }

    #[test]
    fn test_placeholder_until_complete() {
        let mut session = session();
        assert_eq!(*session.view(), QuoteView::Placeholder);

        session.apply(SelectionAction::SelectVehicle("golf".into()));
        session.apply(SelectionAction::SelectCoverage(Some("full".into())));
        assert!(session.view().total().is_none());

        let view = session.apply(SelectionAction::SelectPrintMaterial(Some("cast".into())));
        assert_eq!(view.total(), Some(Amount::new(1500.0)));
    }

    #[test]
    fn test_reprices_after_each_action() {
        let mut session = session();
        session.apply_all([
            SelectionAction::SelectVehicle("golf".into()),
            SelectionAction::SelectCoverage(Some("full".into())),
            SelectionAction::SelectPrintMaterial(Some("cast".into())),
            SelectionAction::SelectLaminationMaterial(Some("gloss".into())),
        ]);
        assert_eq!(session.view().total(), Some(Amount::new(1600.0)));

        session.apply(SelectionAction::SetWhitePrint(true));
        assert_eq!(session.view().total(), Some(Amount::new(1650.0)));
    }

    #[test]
    fn test_vehicle_switch_drops_to_placeholder() {
        let mut session = session();
        session.apply_all([
            SelectionAction::SelectVehicle("golf".into()),
            SelectionAction::SelectCoverage(Some("full".into())),
            SelectionAction::ToggleExtraOption("roof".into()),
            SelectionAction::SelectPrintMaterial(Some("cast".into())),
        ]);
        assert!(session.view().total().is_some());

        session.apply(SelectionAction::SelectVehicle("polo".into()));
        assert_eq!(*session.view(), QuoteView::Placeholder);

        let err = session.price().unwrap_err();
        assert_eq!(err.kind, SelectionErrorKind::Missing);
        assert_eq!(err.field, SelectionField::Coverage);
    }

    #[test]
    fn test_replace_catalog_clears_withdrawn_lamination() {
        let mut session = session();
        session.apply_all([
            SelectionAction::SelectVehicle("golf".into()),
            SelectionAction::SelectCoverage(Some("full".into())),
            SelectionAction::SelectPrintMaterial(Some("cast".into())),
            SelectionAction::SelectLaminationMaterial(Some("gloss".into())),
        ]);

        let without_gloss = Catalog::new(
            catalog().vehicles().cloned(),
            Vec::new(),
            catalog().print_materials().cloned(),
            Vec::new(),
            *catalog().white_print(),
        );
        let total = session.replace_catalog(Arc::new(without_gloss)).total();

        assert_eq!(total, Some(Amount::new(1500.0)));
        assert!(session.state().lamination_material_id.is_none());
    }

    #[test]
    fn test_cart_line() {
        let mut session = session();
        assert!(session.cart_line().is_err());

        session.apply_all([
            SelectionAction::SelectVehicle("golf".into()),
            SelectionAction::SelectCoverage(Some("full".into())),
            SelectionAction::SelectPrintMaterial(Some("cast".into())),
        ]);
        let line = session.cart_line().unwrap();
        assert_eq!(line.total, Amount::new(1500.0));
        assert_eq!(line.description, "Volkswagen Golf - Full Wrap, Cast Vinyl");
    }
}
