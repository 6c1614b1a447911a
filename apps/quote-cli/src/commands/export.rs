//! # Export Command
//!
//! Prices a JSON array of selections into [`QuoteRecord`] rows.
//!
//! ```json
//! [
//!   { "vehicle_id": "golf", "coverage_id": "full", "print_material_id": "cast" },
//!   { "vehicle_id": "golf", "coverage_id": "full", "print_material_id": "cast",
//!     "extra_option_ids": ["roof"], "lamination_material_id": "gloss",
//!     "white_print_requested": true }
//! ]
//! ```
//!
//! Selections that don't price are skipped with a warning; the rest still export.

use tracing::{info, warn};
use wrap_core::{Catalog, QuoteRecord, Selection};

use crate::cli::{ExportArgs, ExportFormat};
use crate::error::AppResult;
use crate::state::AppContext;

/// Records that priced, plus `(index, reason)` for those that didn't.
#[derive(Debug, Default)]
pub struct ExportBatch {
    pub records: Vec<QuoteRecord>,
    pub skipped: Vec<(usize, String)>,
}

pub async fn export(ctx: &AppContext, args: &ExportArgs) -> AppResult<String> {
    let raw = std::fs::read_to_string(&args.input)?;
    let selections: Vec<Selection> = serde_json::from_str(&raw)?;

    let catalog = ctx.snapshot().await?;
    let batch = price_all(&catalog, &selections);

    info!(
        exported = batch.records.len(),
        skipped = batch.skipped.len(),
        "Quotes priced for export"
    );

    let rendered = render(&batch.records, args.format)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            Ok(format!(
                "Exported {} quotes to {} ({} skipped)",
                batch.records.len(),
                path.display(),
                batch.skipped.len()
            ))
        }
        None => Ok(rendered),
    }
}

pub fn price_all(catalog: &Catalog, selections: &[Selection]) -> ExportBatch {
    let mut batch = ExportBatch::default();

    for (index, selection) in selections.iter().enumerate() {
        match QuoteRecord::new(catalog, selection) {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                warn!(index, error = %e, "Skipping unpriceable selection");
                batch.skipped.push((index, e.to_string()));
            }
        }
    }

    batch
}

pub fn render(records: &[QuoteRecord], format: ExportFormat) -> AppResult<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        ExportFormat::Table => {
            let mut lines = vec![QuoteRecord::COLUMNS.join("\t")];
            lines.extend(records.iter().map(|r| r.to_row().join("\t")));
            Ok(lines.join("\n"))
        }
    }
}
