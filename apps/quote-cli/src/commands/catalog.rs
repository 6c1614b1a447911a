//! # Catalog Listing Commands
//!
//! `vehicles` and `materials`: read-only views of the current snapshot,
//! showing the ids a `quote` invocation needs.

use std::fmt::Write;

use tracing::debug;
use wrap_core::{Amount, CalculationMode, Catalog};

use crate::error::{AppError, AppResult};
use crate::state::AppContext;

/// Lists vehicles, optionally restricted to one category.
pub async fn vehicles(ctx: &AppContext, category: Option<&str>) -> AppResult<String> {
    let catalog = ctx.snapshot().await?;
    render_vehicles(&catalog, category, &ctx.config.currency_symbol)
}

pub async fn materials(ctx: &AppContext) -> AppResult<String> {
    let catalog = ctx.snapshot().await?;
    Ok(render_materials(&catalog, &ctx.config.currency_symbol))
}

fn render_vehicles(catalog: &Catalog, category: Option<&str>, symbol: &str) -> AppResult<String> {
    let vehicles: Vec<_> = match category {
        Some(id) => {
            if catalog.category(id).is_none() {
                return Err(AppError::not_found("Category", id));
            }
            catalog.vehicles_in_category(id).collect()
        }
        None => catalog.vehicles().collect(),
    };

    debug!(count = vehicles.len(), ?category, "Listing vehicles");

    if vehicles.is_empty() {
        return Ok("No vehicles in the catalog.".to_string());
    }

    let mut out = String::new();
    for vehicle in vehicles {
        let category_name = vehicle
            .category_id
            .as_deref()
            .and_then(|id| catalog.category(id))
            .map_or("uncategorised", |c| c.name.as_str());

        let _ = writeln!(out, "{}  {}  [{}]", vehicle.id, vehicle.display_name(), category_name);
        for coverage in &vehicle.coverages {
            let _ = writeln!(
                out,
                "    coverage  {:<16} {:<28} {:>12}",
                coverage.id,
                coverage.name,
                coverage.price.format_with(symbol)
            );
        }
        for option in &vehicle.extra_options {
            let _ = writeln!(
                out,
                "    option    {:<16} {:<28} {:>12}",
                option.id,
                option.name,
                option.price.format_with(symbol)
            );
        }
    }

    Ok(out.trim_end().to_string())
}

fn describe_rate(mode: CalculationMode, value: f64, symbol: &str) -> String {
    match mode {
        CalculationMode::Percentage => format!("{}%", value),
        CalculationMode::FixedAmount => Amount::new(value).format_with(symbol),
    }
}

fn render_materials(catalog: &Catalog, symbol: &str) -> String {
    let mut out = String::from("Print materials:\n");
    for material in catalog.print_materials() {
        let _ = writeln!(
            out,
            "  {:<16} {:<28} {:>12}{}",
            material.id,
            material.name,
            describe_rate(material.mode, material.value, symbol),
            if material.allows_white_print {
                "  (white print)"
            } else {
                ""
            }
        );
    }

    out.push_str("Lamination materials:\n");
    for material in catalog.lamination_materials() {
        let _ = writeln!(
            out,
            "  {:<16} {:<28} {:>12}",
            material.id,
            material.name,
            describe_rate(material.mode, material.value, symbol)
        );
    }

    let white_print = catalog.white_print();
    let _ = write!(
        out,
        "White print: {}",
        describe_rate(white_print.mode, white_print.value, symbol)
    );
    out
}
