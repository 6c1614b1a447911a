//! # wrap-db: Catalog Store for Wrap Quote
//!
//! This crate provides persistence for the quote catalog.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Wrap Quote Data Flow                             │
//! │                                                                         │
//! │  CLI command (quote / export / import)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     wrap-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ VehicleRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ MaterialRepo  │    │ 001_initial  │  │   │
//! │  │   │ load_catalog()│    │ CategoryRepo  │    │              │  │   │
//! │  │   │               │    │ SettingsRepo  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  wrap_core::Catalog snapshot ──► compute_price                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//! - [`batch`] - All-or-nothing catalog writes (import)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wrap_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/catalog.db")).await?;
//! let catalog = db.load_catalog().await?;
//! let breakdown = wrap_core::compute_price(&catalog, &selection)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod batch;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use batch::CatalogBatch;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::category::CategoryRepository;
pub use repository::material::MaterialRepository;
pub use repository::settings::SettingsRepository;
pub use repository::vehicle::VehicleRepository;
pub use repository::generate_id;
