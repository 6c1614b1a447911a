//! # Selection & Selection Reducer
//!
//! What the customer picked, and how a configurator form evolves that
//! choice one user action at a time.
//!
//! ## Dependent-Field Resets
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    reduce(state, action) → state                        │
//! │                                                                         │
//! │  SelectVehicle(other) ───────► coverage = None, options = {}            │
//! │  SelectVehicle(same)  ───────► unchanged                                │
//! │  LaminationOptionsChanged ───► lamination = None if no longer listed    │
//! │  Reset ──────────────────────► empty draft                              │
//! │  everything else ────────────► sets exactly the named field             │
//! │                                                                         │
//! │  Each transition is explicit: nothing is reset as a hidden side effect │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use wrap_core::selection::{reduce, SelectionAction, SelectionState};
//!
//! let state = SelectionState::default();
//! let state = reduce(&state, SelectionAction::SelectVehicle("golf".into()));
//! let state = reduce(&state, SelectionAction::SelectCoverage(Some("full".into())));
//! let state = reduce(&state, SelectionAction::SelectVehicle("polo".into()));
//! assert!(state.coverage_id.is_none());
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{SelectionError, SelectionField};

// =============================================================================
// Selection
// =============================================================================

/// A complete pricing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Selection {
    pub vehicle_id: String,
    pub coverage_id: String,
    #[serde(default)]
    pub extra_option_ids: BTreeSet<String>,
    pub print_material_id: String,
    #[serde(default)]
    pub lamination_material_id: Option<String>,
    #[serde(default)]
    pub white_print_requested: bool,
}

impl Selection {
    /// Creates a selection with no options, no lamination and no white print.
    pub fn new(
        vehicle_id: impl Into<String>,
        coverage_id: impl Into<String>,
        print_material_id: impl Into<String>,
    ) -> Self {
        Selection {
            vehicle_id: vehicle_id.into(),
            coverage_id: coverage_id.into(),
            extra_option_ids: BTreeSet::new(),
            print_material_id: print_material_id.into(),
            lamination_material_id: None,
            white_print_requested: false,
        }
    }

    pub fn with_extra_option(mut self, id: impl Into<String>) -> Self {
        self.extra_option_ids.insert(id.into());
        self
    }

    pub fn with_lamination(mut self, id: impl Into<String>) -> Self {
        self.lamination_material_id = Some(id.into());
        self
    }

    pub fn with_white_print(mut self, requested: bool) -> Self {
        self.white_print_requested = requested;
        self
    }
}

// =============================================================================
// Draft State
// =============================================================================

/// A selection still being assembled in a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectionState {
    pub vehicle_id: Option<String>,
    pub coverage_id: Option<String>,
    pub extra_option_ids: BTreeSet<String>,
    pub print_material_id: Option<String>,
    pub lamination_material_id: Option<String>,
    pub white_print_requested: bool,
}

impl SelectionState {
    /// Converts the draft into a pricing request.
    ///
    /// Fails with a `Missing` error naming the first unset required field,
    /// in form order: vehicle, coverage, print material.
    pub fn to_selection(&self) -> Result<Selection, SelectionError> {
        let vehicle_id = self
            .vehicle_id
            .clone()
            .ok_or_else(|| SelectionError::missing(SelectionField::Vehicle))?;
        let coverage_id = self
            .coverage_id
            .clone()
            .ok_or_else(|| SelectionError::missing(SelectionField::Coverage))?;
        let print_material_id = self
            .print_material_id
            .clone()
            .ok_or_else(|| SelectionError::missing(SelectionField::PrintMaterial))?;

        Ok(Selection {
            vehicle_id,
            coverage_id,
            extra_option_ids: self.extra_option_ids.clone(),
            print_material_id,
            lamination_material_id: self.lamination_material_id.clone(),
            white_print_requested: self.white_print_requested,
        })
    }
}

impl From<&Selection> for SelectionState {
    fn from(selection: &Selection) -> Self {
        SelectionState {
            vehicle_id: Some(selection.vehicle_id.clone()),
            coverage_id: Some(selection.coverage_id.clone()),
            extra_option_ids: selection.extra_option_ids.clone(),
            print_material_id: Some(selection.print_material_id.clone()),
            lamination_material_id: selection.lamination_material_id.clone(),
            white_print_requested: selection.white_print_requested,
        }
    }
}

// =============================================================================
// Actions
// =============================================================================

/// One user interaction with the configurator form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SelectionAction {
    SelectVehicle(String),
    SelectCoverage(Option<String>),
    ToggleExtraOption(String),
    SetExtraOptions(BTreeSet<String>),
    SelectPrintMaterial(Option<String>),
    SelectLaminationMaterial(Option<String>),
    SetWhitePrint(bool),
    /// The list of offered lamination materials was reloaded.
    LaminationOptionsChanged(Vec<String>),
    Reset,
}

/// Applies one action to a draft and returns the next draft.
pub fn reduce(state: &SelectionState, action: SelectionAction) -> SelectionState {
    let mut next = state.clone();

    match action {
        SelectionAction::SelectVehicle(vehicle_id) => {
            if next.vehicle_id.as_deref() != Some(vehicle_id.as_str()) {
                next.coverage_id = None;
                next.extra_option_ids.clear();
                next.vehicle_id = Some(vehicle_id);
            }
        }
        SelectionAction::SelectCoverage(coverage_id) => {
            next.coverage_id = coverage_id;
        }
        SelectionAction::ToggleExtraOption(option_id) => {
            if !next.extra_option_ids.remove(&option_id) {
                next.extra_option_ids.insert(option_id);
            }
        }
        SelectionAction::SetExtraOptions(option_ids) => {
            next.extra_option_ids = option_ids;
        }
        SelectionAction::SelectPrintMaterial(material_id) => {
            next.print_material_id = material_id;
        }
        SelectionAction::SelectLaminationMaterial(material_id) => {
            next.lamination_material_id = material_id;
        }
        SelectionAction::SetWhitePrint(requested) => {
            next.white_print_requested = requested;
        }
        SelectionAction::LaminationOptionsChanged(available) => {
            let still_offered = next
                .lamination_material_id
                .as_ref()
                .map_or(true, |id| available.contains(id));
            if !still_offered {
                next.lamination_material_id = None;
            }
        }
        SelectionAction::Reset => {
            next = SelectionState::default();
        }
    }

    next
}

// =============================================================================
// Unit Tests
// =============================================================================
