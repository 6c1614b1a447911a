//! Per-invocation context: configuration plus the open catalog store.

use std::sync::Arc;

use tracing::info;
use wrap_core::Catalog;
use wrap_db::{Database, DbConfig};

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::state::QuoteSession;

#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub db: Database,
}

impl AppContext {
    /// Opens (and migrates) the configured database.
    pub async fn open(config: AppConfig) -> AppResult<Self> {
        if let Some(parent) = config.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::new(DbConfig::new(&config.database_path)).await?;
        info!(path = %config.database_path.display(), "Catalog store ready");

        Ok(AppContext { config, db })
    }

    /// Wraps an already open database (tests, embedding).
    pub fn with_database(config: AppConfig, db: Database) -> Self {
        AppContext { config, db }
    }

    pub async fn snapshot(&self) -> AppResult<Arc<Catalog>> {
        Ok(Arc::new(self.db.load_catalog().await?))
    }

    /// Starts a quote session on a fresh snapshot.
    pub async fn session(&self) -> AppResult<QuoteSession> {
        Ok(QuoteSession::new(self.snapshot().await?))
    }
}
