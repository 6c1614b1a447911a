//! # Import Command
//!
//! Loads catalog entities from a JSON file and reconciles each row with
//! the store before upserting it.
//!
//! ```text
//! rows ──► reconcile_all(rows, existing) ──► per row:
//!            Existing { id } ─► row.id = id          (update in place)
//!            SameAs { row }  ─► id of that earlier row
//!            New, row has id ─► keep it
//!            New, no id      ─► generate_id()
//!
//! categories first: vehicles referring to a remapped category id follow it
//!
//! resolved rows ──► CatalogBatch::validate() ──► write_batch (one transaction)
//!                   (dry runs stop after validating)
//! ```

use std::collections::HashMap;
use std::fmt::Write;

use serde::Deserialize;
use tracing::{debug, info};
use wrap_core::reconcile::{reconcile_all, Reconcilable, ReconcileReport, RowMatch};
use wrap_core::{Category, LaminationMaterial, PrintMaterial, Vehicle, WhitePrintSettings};
use wrap_db::{generate_id, CatalogBatch};

use crate::cli::ImportArgs;
use crate::error::AppResult;
use crate::state::AppContext;

/// The import file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogImport {
    pub categories: Vec<Category>,
    pub vehicles: Vec<Vehicle>,
    pub print_materials: Vec<PrintMaterial>,
    pub lamination_materials: Vec<LaminationMaterial>,
    pub white_print: Option<WhitePrintSettings>,
}

/// Rows with final ids, their match report and `incoming id → final id`.
struct Resolved<T> {
    rows: Vec<T>,
    report: ReconcileReport,
    remapped: HashMap<String, String>,
}

fn resolve_ids<T: Reconcilable>(
    rows: Vec<T>,
    existing: &[T],
    set_id: impl Fn(&mut T, String),
) -> Resolved<T> {
    let report = reconcile_all(&rows, existing);
    let mut remapped = HashMap::new();
    let mut final_ids: Vec<String> = Vec::with_capacity(rows.len());

    let rows = rows
        .into_iter()
        .zip(&report.matches)
        .map(|(mut row, matched)| {
            let incoming = row.entity_id().trim().to_string();
            let id = match matched {
                RowMatch::Existing { id, .. } => id.clone(),
                RowMatch::SameAs { row: first, .. } => final_ids[*first].clone(),
                RowMatch::New if !incoming.is_empty() => incoming.clone(),
                RowMatch::New => generate_id(),
            };
            if !incoming.is_empty() && incoming != id {
                remapped.insert(incoming, id.clone());
            }
            final_ids.push(id.clone());
            set_id(&mut row, id);
            row
        })
        .collect();

    Resolved {
        rows,
        report,
        remapped,
    }
}

pub async fn import(ctx: &AppContext, args: &ImportArgs) -> AppResult<String> {
    let raw = std::fs::read_to_string(&args.input)?;
    let file: CatalogImport = serde_json::from_str(&raw)?;
    let db = &ctx.db;

    let categories = resolve_ids(file.categories, &db.categories().list().await?, |c, id| {
        c.id = id
    });

    let mut vehicles = resolve_ids(file.vehicles, &db.vehicles().list().await?, |v, id| {
        v.id = id
    });
    for vehicle in &mut vehicles.rows {
        if let Some(category_id) = &vehicle.category_id {
            if let Some(mapped) = categories.remapped.get(category_id) {
                debug!(from = %category_id, to = %mapped, "Following remapped category");
                vehicle.category_id = Some(mapped.clone());
            }
        }
    }

    let prints = resolve_ids(
        file.print_materials,
        &db.materials().list_print().await?,
        |m, id| m.id = id,
    );
    let laminations = resolve_ids(
        file.lamination_materials,
        &db.materials().list_lamination().await?,
        |m, id| m.id = id,
    );

    let batch = CatalogBatch {
        categories: categories.rows,
        vehicles: vehicles.rows,
        print_materials: prints.rows,
        lamination_materials: laminations.rows,
        white_print: file.white_print,
    };
    batch.validate()?;

    if !args.dry_run && !batch.is_empty() {
        db.write_batch(&batch).await?;
    }

    info!(
        dry_run = args.dry_run,
        categories = batch.categories.len(),
        vehicles = batch.vehicles.len(),
        print_materials = batch.print_materials.len(),
        lamination_materials = batch.lamination_materials.len(),
        "Catalog import reconciled"
    );

    let mut out = String::new();
    summarize(&mut out, "categories", &categories.report);
    summarize(&mut out, "vehicles", &vehicles.report);
    summarize(&mut out, "print materials", &prints.report);
    summarize(&mut out, "lamination materials", &laminations.report);
    if batch.white_print.is_some() {
        out.push_str("white print: updated\n");
    }
    if args.dry_run {
        out.push_str("(dry run, nothing written)");
    }

    Ok(out.trim_end().to_string())
}

fn summarize(out: &mut String, label: &str, report: &ReconcileReport) {
    if report.matches.is_empty() {
        return;
    }
    let _ = write!(
        out,
        "{}: {} matched, {} new",
        label, report.matched, report.created
    );
    if report.merged > 0 {
        let _ = write!(out, ", {} repeated", report.merged);
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::error::ErrorCode;
    use std::path::PathBuf;
    use wrap_core::CalculationMode;

    fn write_input(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "wrap-quote-import-{}-{}.json",
            std::process::id(),
            name
        ));
        std::fs::write(&path, json).unwrap();
        path
    }

    const IMPORT: &str = r#"{
        "categories": [
            { "id": "c-77", "name": "COMPACT" },
            { "name": "Van" }
        ],
        "vehicles": [
            {
                "manufacturer": "volkswagen", "model": "golf", "production_period": "2020-2024",
                "category_id": "c-77",
                "coverages": [{ "id": "full", "name": "Full Wrap", "price": 1100.0 }]
            },
            {
                "manufacturer": "Ford", "model": "Transit",
                "coverages": [{ "id": "full", "name": "Full Wrap", "price": 2500.0 }]
            }
        ],
        "print_materials": [
            { "name": "cast vinyl", "mode": "fixed_amount", "value": 400.0, "allows_white_print": false }
        ],
        "white_print": { "mode": "percentage", "value": 10.0 }
    }"#;

    #[tokio::test]
    async fn test_import_reconciles_and_upserts() {
        let ctx = test_support::context().await;
        let input = write_input("full", IMPORT);

        let out = import(&ctx, &ImportArgs { input: input.clone(), dry_run: false })
            .await
            .unwrap();
        std::fs::remove_file(&input).unwrap();

        assert!(out.contains("categories: 1 matched, 1 new"));
        assert!(out.contains("vehicles: 1 matched, 1 new"));
        assert!(out.contains("print materials: 1 matched, 0 new"));
        assert!(out.contains("white print: updated"));

        // Matched by name: updated in place, foreign category id followed
        let golf = ctx.db.vehicles().get_by_id("golf").await.unwrap().unwrap();
        assert_eq!(golf.coverages[0].price.value(), 1100.0);
        assert_eq!(golf.category_id.as_deref(), Some("compact"));

        let cast = ctx.db.materials().get_print("cast").await.unwrap().unwrap();
        assert_eq!(cast.mode, CalculationMode::FixedAmount);

        assert_eq!(ctx.db.vehicles().count().await.unwrap(), 2);
        assert_eq!(ctx.db.categories().count().await.unwrap(), 2);
        assert_eq!(
            ctx.db.settings().white_print().await.unwrap().value,
            10.0
        );
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let ctx = test_support::context().await;
        let input = write_input("dry", IMPORT);

        let out = import(&ctx, &ImportArgs { input: input.clone(), dry_run: true })
            .await
            .unwrap();
        std::fs::remove_file(&input).unwrap();

        assert!(out.ends_with("(dry run, nothing written)"));
        assert_eq!(ctx.db.vehicles().count().await.unwrap(), 1);
        let golf = ctx.db.vehicles().get_by_id("golf").await.unwrap().unwrap();
        assert_eq!(golf.coverages[0].price.value(), 1000.0);
    }

    const ONE_BAD_VEHICLE: &str = r#"{
        "categories": [{ "name": "Truck" }],
        "vehicles": [
            {
                "manufacturer": "Ford", "model": "Transit",
                "coverages": [{ "id": "full", "name": "Full Wrap", "price": 2500.0 }]
            },
            {
                "manufacturer": "Renault", "model": "Master",
                "coverages": [{ "id": "full", "name": "Full Wrap", "price": -1.0 }]
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_invalid_row_aborts_whole_import() {
        let ctx = test_support::context().await;
        let input = write_input("invalid", ONE_BAD_VEHICLE);

        let err = import(&ctx, &ImportArgs { input: input.clone(), dry_run: false })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // Nothing before the bad row was kept
        assert_eq!(ctx.db.categories().count().await.unwrap(), 1);
        assert_eq!(ctx.db.vehicles().count().await.unwrap(), 1);

        // A dry run rejects the same file
        let err = import(&ctx, &ImportArgs { input: input.clone(), dry_run: true })
            .await
            .unwrap_err();
        std::fs::remove_file(&input).unwrap();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("coverage.price"));
    }

    #[tokio::test]
    async fn test_repeated_rows_create_one_entity() {
        let ctx = test_support::context().await;
        let input = write_input(
            "repeated",
            r#"{
                "categories": [{ "name": "Van" }, { "id": "v-2", "name": "van" }],
                "vehicles": [{
                    "manufacturer": "Ford", "model": "Transit", "category_id": "v-2",
                    "coverages": [{ "id": "full", "name": "Full Wrap", "price": 2500.0 }]
                }]
            }"#,
        );

        let out = import(&ctx, &ImportArgs { input: input.clone(), dry_run: false })
            .await
            .unwrap();
        std::fs::remove_file(&input).unwrap();

        assert!(out.contains("categories: 0 matched, 1 new, 1 repeated"));
        assert_eq!(ctx.db.categories().count().await.unwrap(), 2);

        // The vehicle follows the second row to the single stored category
        let categories = ctx.db.categories().list().await.unwrap();
        let van = categories.iter().find(|c| c.name == "van").unwrap();
        let vehicles = ctx.db.vehicles().list().await.unwrap();
        let transit = vehicles.iter().find(|v| v.model == "Transit").unwrap();
        assert_eq!(transit.category_id.as_deref(), Some(van.id.as_str()));
    }

    #[test]
    fn test_resolve_ids_generates_and_remaps() {
        let existing = vec![Category::new("compact", "Compact")];
        let rows = vec![
            Category::new("c-77", "compact"),
            Category::new("", "Pickup"),
            Category::new("van", "Van"),
        ];

        let resolved = resolve_ids(rows, &existing, |c, id| c.id = id);

        assert_eq!(resolved.rows[0].id, "compact");
        assert!(!resolved.rows[1].id.is_empty());
        assert_eq!(resolved.rows[2].id, "van");
        assert_eq!(resolved.remapped.get("c-77").map(String::as_str), Some("compact"));
        assert_eq!(resolved.remapped.len(), 1);
    }
}
