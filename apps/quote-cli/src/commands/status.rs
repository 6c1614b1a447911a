//! # Status Command
//!
//! Database health, migration state and catalog size.

use std::fmt::Write;

use crate::error::{AppError, AppResult, ErrorCode};
use crate::state::AppContext;

pub async fn status(ctx: &AppContext) -> AppResult<String> {
    if !ctx.db.health_check().await {
        return Err(AppError::new(ErrorCode::DatabaseError, "Database is not responding"));
    }

    let (total, applied) = ctx.db.migration_status().await?;
    let materials = ctx.db.materials();

    let mut out = String::new();
    let _ = writeln!(out, "database:             {}", ctx.config.database_path.display());
    let _ = writeln!(out, "migrations:           {}/{} applied", applied, total);
    let _ = writeln!(out, "categories:           {}", ctx.db.categories().count().await?);
    let _ = writeln!(out, "vehicles:             {}", ctx.db.vehicles().count().await?);
    let _ = writeln!(out, "print materials:      {}", materials.count_print().await?);
    let _ = write!(out, "lamination materials: {}", materials.count_lamination().await?);

    Ok(out)
}
