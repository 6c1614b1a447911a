//! # Application Configuration
//!
//! ## Configuration Sources (lowest to highest priority)
//! 1. Defaults (this file)
//! 2. Config file: `--config <path>` or `./wrap-quote.toml` if present
//! 3. Environment variables `WRAP_QUOTE__<FIELD>`
//! 4. `--db` on the command line (database path only)
//!
//! ```toml
//! # wrap-quote.toml
//! database_path = "/srv/wrap/catalog.db"
//! currency_symbol = "€"
//! default_lamination_id = "gloss"
//! log_filter = "info,wrap=debug,sqlx=warn"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub const ENV_PREFIX: &str = "WRAP_QUOTE";
pub const DEFAULT_CONFIG_FILE: &str = "wrap-quote";
pub const DEFAULT_LOG_FILTER: &str = "info,wrap=debug,sqlx=warn";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// SQLite catalog file.
    pub database_path: PathBuf,

    /// Prefix for rendered amounts.
    pub currency_symbol: String,

    /// Lamination applied when a quote names none.
    #[serde(default)]
    pub default_lamination_id: Option<String>,

    /// `EnvFilter` directives; `RUST_LOG` still wins.
    pub log_filter: String,
}

impl AppConfig {
    /// Loads configuration from the optional file and the process environment.
    pub fn load(file: Option<&Path>) -> AppResult<Self> {
        Self::from_sources(file, None)
    }

    /// Builds configuration from explicit sources.
    ///
    /// `env` replaces the process environment when given.
    pub fn from_sources(
        file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> AppResult<Self> {
        let file_source = match file {
            // An explicitly named file must exist
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .set_default("database_path", default_database_path().display().to_string())?
            .set_default("currency_symbol", "€")?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .source(env),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(AppError::config("database_path must not be empty"));
        }
        if let Some(id) = &self.default_lamination_id {
            if id.trim().is_empty() {
                return Err(AppError::config(
                    "default_lamination_id must not be blank; omit it instead",
                ));
            }
        }
        Ok(())
    }

    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }
}

/// Platform data directory, falling back to the working directory.
///
/// - **macOS**: `~/Library/Application Support/com.wrapquote.wrap-quote/catalog.db`
/// - **Windows**: `%APPDATA%\wrapquote\wrap-quote\data\catalog.db`
/// - **Linux**: `~/.local/share/wrap-quote/catalog.db`
pub fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "wrapquote", "wrap-quote")
        .map(|dirs| dirs.data_dir().join("catalog.db"))
        .unwrap_or_else(|| PathBuf::from("catalog.db"))
}

// =============================================================================
// Unit Tests
// =============================================================================
