//! # wrap-core: Pure Pricing Logic for Wrap Quote
//!
//! This crate is the **heart** of Wrap Quote. It prices vehicle-graphics
//! (vinyl wrap) jobs as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Wrap Quote Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Configurator front end (CLI / UI)               │   │
//! │  │   Vehicle ──► Coverage ──► Options ──► Materials ──► Total      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ SelectionAction                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ wrap-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │ selection │  │  pricing  │  │   quote   │  │   │
//! │  │   │  Vehicle  │  │  reducer  │  │ Breakdown │  │ ExportRow │  │   │
//! │  │   │ Materials │  │ Selection │  │ LineItem  │  │ CartLine  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    wrap-db (Catalog Store)                      │   │
//! │  │          SQLite queries, migrations, catalog snapshots          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`amount`] - Currency amount newtype (plain floating point, rounded only for display)
//! - [`types`] - Catalog entities (Vehicle, Coverage, materials, settings)
//! - [`catalog`] - Immutable catalog snapshot handed to the engine
//! - [`selection`] - Selection request and the UI-state reducer
//! - [`pricing`] - The price calculation itself
//! - [`quote`] - Export rows and cart lines built from a priced selection
//! - [`reconcile`] - Matching imported rows to existing catalog entities
//! - [`validation`] - Catalog entity validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use wrap_core::{compute_price, Amount, CalculationMode, Catalog, Coverage, PrintMaterial,
//!     Selection, Vehicle};
//!
//! let vehicle = Vehicle::new("golf", "Volkswagen", "Golf")
//!     .with_coverage(Coverage::new("full", "Full Wrap", Amount::new(500.0)));
//! let catalog = Catalog::default()
//!     .with_vehicle(vehicle)
//!     .with_print_material(PrintMaterial::new("cast", "Cast Vinyl", CalculationMode::FixedAmount, 50.0));
//!
//! let selection = Selection::new("golf", "full", "cast");
//! let breakdown = compute_price(&catalog, &selection).unwrap();
//!
//! assert_eq!(breakdown.total(), Amount::new(550.0));
//! assert_eq!(breakdown.lines().len(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod catalog;
pub mod error;
pub mod pricing;
pub mod quote;
pub mod reconcile;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use amount::Amount;
pub use catalog::Catalog;
pub use error::{CoreError, SelectionError, SelectionErrorKind, SelectionField, ValidationError};
pub use pricing::{compute_price, quote_view, LineItem, LineKind, PriceBreakdown, QuoteView};
pub use quote::{CartLine, QuoteRecord};
pub use selection::{reduce, Selection, SelectionAction, SelectionState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of any catalog display name (vehicle model, material, ...).
pub const MAX_NAME_LENGTH: usize = 200;

/// Label of the extra-options breakdown line.
pub const EXTRA_OPTIONS_LABEL: &str = "Extra options";

/// Label of the white-print breakdown line.
pub const WHITE_PRINT_LABEL: &str = "White print";
