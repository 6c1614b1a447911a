//! # wrap-quote Library
//!
//! Orchestration layer of the Wrap Quote CLI: configuration, logging,
//! catalog store access and the subcommands.
//!
//! ## Module Organization
//! ```text
//! wrap_quote/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions
//! ├── config.rs       ◄─── AppConfig (defaults → file → env)
//! ├── error.rs        ◄─── AppError for commands
//! ├── state/
//! │   ├── context.rs  ◄─── AppContext (config + database)
//! │   └── session.rs  ◄─── QuoteSession (snapshot + draft selection)
//! └── commands/
//!     ├── catalog.rs  ◄─── vehicles, materials
//!     ├── quote.rs    ◄─── quote (text / --json / --cart)
//!     ├── export.rs   ◄─── export (json / table)
//!     ├── import.rs   ◄─── import with reconciliation
//!     └── status.rs   ◄─── status
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::AppConfig;
use error::AppResult;
use state::AppContext;

/// Runs one CLI invocation and returns what should be printed on stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load Configuration ─── defaults, wrap-quote.toml, WRAP_QUOTE__*    │
/// │  2. Apply --db override                                                │
/// │  3. Initialize Logging ─── RUST_LOG, else config.log_filter (stderr)   │
/// │  4. Open Catalog Store ─── create file, WAL, run migrations            │
/// │  5. Dispatch Subcommand                                                │
/// │  6. Close Pool                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<String> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.db {
        config = config.with_database_path(path);
    }

    init_tracing(&config.log_filter);

    info!(command = ?cli.command, "Starting wrap-quote");

    let ctx = AppContext::open(config).await?;
    let output = commands::dispatch(&ctx, cli.command).await;
    ctx.db.close().await;

    output
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=wrap=trace` - Trace the wrap crates only
/// - Default: `log_filter` from the configuration
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Already initialized when embedded in a host that set its own subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
