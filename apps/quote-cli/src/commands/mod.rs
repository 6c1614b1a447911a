//! # Commands Module
//!
//! One function per subcommand. Each returns the text for stdout.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch)
//! ├── catalog.rs  ◄─── vehicles, materials
//! ├── quote.rs    ◄─── quote
//! ├── export.rs   ◄─── export
//! ├── import.rs   ◄─── import
//! └── status.rs   ◄─── status
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  wrap-quote quote --vehicle golf --coverage full --print cast          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  dispatch(&ctx, Command::Quote(args))                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  quote::quote(&ctx, &args) ─► ctx.session() ─► apply actions ─► render │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  AppResult<String> ─► main prints it (or anyhow reports the AppError)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod export;
pub mod import;
pub mod quote;
pub mod status;

use crate::cli::Command;
use crate::error::AppResult;
use crate::state::AppContext;

pub async fn dispatch(ctx: &AppContext, command: Command) -> AppResult<String> {
    match command {
        Command::Vehicles { category } => catalog::vehicles(ctx, category.as_deref()).await,
        Command::Materials => catalog::materials(ctx).await,
        Command::Quote(args) => quote::quote(ctx, &args).await,
        Command::Export(args) => export::export(ctx, &args).await,
        Command::Import(args) => import::import(ctx, &args).await,
        Command::Status => status::status(ctx).await,
    }
}
