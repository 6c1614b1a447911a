//! # Database Pool Management
//!
//! Connection pool creation and catalog snapshot loading.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Store Lifecycle                            │
//! │                                                                         │
//! │  CLI startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ├──► db.vehicles() / db.materials() / ...   (catalog edits)      │
//! │       │                                                                 │
//! │       └──► db.load_catalog().await                                     │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │            Catalog (immutable, owned) ──► compute_price per keystroke  │
//! │                                                                         │
//! │  Pricing never touches the pool: one load, many quotes.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! File databases run in WAL mode so a long export doesn't block an
//! editor saving a material. In-memory databases skip it.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use wrap_core::Catalog;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::category::CategoryRepository;
use crate::repository::material::MaterialRepository;
use crate::repository::settings::SettingsRepository;
use crate::repository::vehicle::VehicleRepository;

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/catalog.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// The file is created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            // Every connection would get its own empty database
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        if self.is_in_memory() {
            let options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
                .foreign_keys(true);
            return Ok(options);
        }

        let connect_url = format!("sqlite://{}?mode=rwc", self.database_path.display());

        let options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // Off by default in SQLite; variants rely on ON DELETE CASCADE
            .foreign_keys(true)
            .create_if_missing(true);

        Ok(options)
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("catalog.db")).await?;
///
/// db.materials().upsert_print(&material).await?;
/// let catalog = db.load_catalog().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and applies pending migrations (if enabled).
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_options = config.connect_options()?;

        debug!(in_memory = config.is_in_memory(), "Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    ///
    /// Called by `new()` unless migrations are disabled in the config.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns `(total, applied)` migration counts.
    pub async fn migration_status(&self) -> DbResult<(usize, usize)> {
        migrations::migration_status(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.pool.clone())
    }

    pub fn vehicles(&self) -> VehicleRepository {
        VehicleRepository::new(self.pool.clone())
    }

    /// Print and lamination materials.
    pub fn materials(&self) -> MaterialRepository {
        MaterialRepository::new(self.pool.clone())
    }

    /// White-print settings.
    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(self.pool.clone())
    }

    /// Loads every catalog table into an immutable snapshot.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let catalog = db.load_catalog().await?;
    /// let breakdown = wrap_core::compute_price(&catalog, &selection)?;
    /// ```
    pub async fn load_catalog(&self) -> DbResult<Catalog> {
        let vehicles = self.vehicles().list().await?;
        let categories = self.categories().list().await?;
        let print_materials = self.materials().list_print().await?;
        let lamination_materials = self.materials().list_lamination().await?;
        let white_print = self.settings().white_print().await?;

        info!(
            vehicles = vehicles.len(),
            categories = categories.len(),
            print_materials = print_materials.len(),
            lamination_materials = lamination_materials.len(),
            "Catalog snapshot loaded"
        );

        Ok(Catalog::new(
            vehicles,
            categories,
            print_materials,
            lamination_materials,
            white_print,
        ))
    }

    /// Closes the connection pool. Repository calls fail afterwards.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wrap_core::{
        compute_price, Amount, CalculationMode, Coverage, LaminationMaterial, PrintMaterial,
        Selection, Vehicle, WhitePrintSettings,
    };

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        let (total, applied) = db.migration_status().await.unwrap();
        assert_eq!(total, applied);
        assert!(total >= 1);
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/catalog.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }

    #[tokio::test]
    async fn test_empty_catalog_snapshot() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = db.load_catalog().await.unwrap();

        assert!(catalog.is_empty());
        assert_eq!(*catalog.white_print(), WhitePrintSettings::default());
    }

    #[tokio::test]
    async fn test_snapshot_prices_like_in_memory_catalog() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.vehicles()
            .upsert(
                &Vehicle::new("golf", "Volkswagen", "Golf")
                    .with_coverage(Coverage::new("full", "Full Wrap", Amount::new(1000.0))),
            )
            .await
            .unwrap();
        db.materials()
            .upsert_print(
                &PrintMaterial::new("cast", "Cast Vinyl", CalculationMode::Percentage, 50.0)
                    .with_white_print(true),
            )
            .await
            .unwrap();
        db.materials()
            .upsert_lamination(&LaminationMaterial::new(
                "gloss",
                "Gloss Laminate",
                CalculationMode::FixedAmount,
                100.0,
            ))
            .await
            .unwrap();
        db.settings()
            .set_white_print(&WhitePrintSettings::new(CalculationMode::FixedAmount, 50.0))
            .await
            .unwrap();

        let catalog = db.load_catalog().await.unwrap();
        let selection = Selection::new("golf", "full", "cast")
            .with_lamination("gloss")
            .with_white_print(true);

        let breakdown = compute_price(&catalog, &selection).unwrap();
        assert_eq!(breakdown.total(), Amount::new(1650.0));
    }
}
