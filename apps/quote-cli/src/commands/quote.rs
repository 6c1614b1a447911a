//! # Quote Command
//!
//! Prices one selection given on the command line.
//!
//! ```text
//! QuoteArgs ──► actions() ──► QuoteSession::apply_all ──┬──► text breakdown
//!                                                       ├──► --json  PriceBreakdown
//!                                                       └──► --cart  CartLine
//! ```
//!
//! An incomplete selection renders the placeholder in text mode; an id
//! the catalog doesn't know is always an error.

use std::collections::BTreeSet;
use std::fmt::Write;

use tracing::{info, warn};
use wrap_core::{PriceBreakdown, SelectionAction, SelectionErrorKind};

use crate::cli::QuoteArgs;
use crate::error::AppResult;
use crate::state::{AppContext, QuoteSession};

pub async fn quote(ctx: &AppContext, args: &QuoteArgs) -> AppResult<String> {
    let mut session = ctx.session().await?;

    let lamination = resolve_lamination(&session, args, ctx.config.default_lamination_id.as_deref());
    session.apply_all(actions(args, lamination));

    if let Some(total) = session.view().total() {
        info!(total = %total, "Quote priced");
    }

    render(&session, args, &ctx.config.currency_symbol)
}

/// Explicit lamination, else the configured default if the catalog offers it.
fn resolve_lamination(
    session: &QuoteSession,
    args: &QuoteArgs,
    default_id: Option<&str>,
) -> Option<String> {
    if args.no_lamination {
        return None;
    }
    if let Some(id) = &args.lamination {
        return Some(id.clone());
    }

    let default_id = default_id?;
    if session.catalog().lamination_material(default_id).is_some() {
        Some(default_id.to_string())
    } else {
        warn!(id = %default_id, "Configured default lamination not in catalog, ignoring");
        None
    }
}

/// The form interactions equivalent to the given arguments.
fn actions(args: &QuoteArgs, lamination: Option<String>) -> Vec<SelectionAction> {
    let mut actions = Vec::new();

    if let Some(vehicle) = &args.vehicle {
        actions.push(SelectionAction::SelectVehicle(vehicle.clone()));
    }
    actions.push(SelectionAction::SelectCoverage(args.coverage.clone()));
    actions.push(SelectionAction::SetExtraOptions(
        args.options.iter().cloned().collect::<BTreeSet<_>>(),
    ));
    actions.push(SelectionAction::SelectPrintMaterial(args.print.clone()));
    actions.push(SelectionAction::SelectLaminationMaterial(lamination));
    actions.push(SelectionAction::SetWhitePrint(args.white_print));

    actions
}

fn render(session: &QuoteSession, args: &QuoteArgs, symbol: &str) -> AppResult<String> {
    if args.cart {
        let line = session.cart_line()?;
        return Ok(serde_json::to_string_pretty(&line)?);
    }

    match session.price() {
        Ok(breakdown) if args.json => Ok(serde_json::to_string_pretty(&breakdown)?),
        Ok(breakdown) => Ok(render_breakdown(session, &breakdown, symbol)),
        Err(e) if e.kind == SelectionErrorKind::Missing && !args.json => {
            Ok(format!("Total: --\n(select a {} to see a price)", e.field))
        }
        Err(e) => Err(e.into()),
    }
}

fn render_breakdown(session: &QuoteSession, breakdown: &PriceBreakdown, symbol: &str) -> String {
    let mut out = String::new();

    let heading = session
        .state()
        .vehicle_id
        .as_deref()
        .and_then(|id| session.catalog().vehicle(id))
        .map(|v| v.display_name());
    if let Some(heading) = heading {
        let _ = writeln!(out, "{}", heading);
    }

    for line in breakdown.lines() {
        let _ = writeln!(out, "  {:<36} {:>14}", line.label, line.amount.format_with(symbol));
    }
    let _ = write!(
        out,
        "  {:<36} {:>14}",
        "Total",
        breakdown.total().format_with(symbol)
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::error::ErrorCode;
    use wrap_core::{Amount, CartLine};

    fn golf_args() -> QuoteArgs {
        QuoteArgs {
            vehicle: Some("golf".to_string()),
            coverage: Some("full".to_string()),
            print: Some("cast".to_string()),
            ..QuoteArgs::default()
        }
    }

    #[tokio::test]
    async fn test_text_breakdown() {
        let ctx = test_support::context().await;
        let args = QuoteArgs {
            options: vec!["roof".to_string()],
            lamination: Some("gloss".to_string()),
            white_print: true,
            ..golf_args()
        };

        let out = quote(&ctx, &args).await.unwrap();

        // 1000 + 200, print 50% = 600, lamination 100, white print 50
        assert!(out.starts_with("Volkswagen Golf (2020-2024)"));
        assert!(out.contains("Base price (Full Wrap)"));
        assert!(out.contains("Cast Vinyl"));
        assert!(out.contains("€ 600.00"));
        assert!(out.trim_end().ends_with("€ 1950.00"));
    }

    #[tokio::test]
    async fn test_json_breakdown() {
        let ctx = test_support::context().await;
        let args = QuoteArgs {
            json: true,
            ..golf_args()
        };

        let out = quote(&ctx, &args).await.unwrap();
        let breakdown: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(breakdown["total"], 1500.0);
    }

    #[tokio::test]
    async fn test_cart_line() {
        let ctx = test_support::context().await;
        let args = QuoteArgs {
            cart: true,
            ..golf_args()
        };

        let out = quote(&ctx, &args).await.unwrap();
        let line: CartLine = serde_json::from_str(&out).unwrap();
        assert_eq!(line.total, Amount::new(1500.0));
        assert_eq!(line.selection.vehicle_id, "golf");
    }

    #[tokio::test]
    async fn test_default_lamination_applied() {
        let mut ctx = test_support::context().await;
        ctx.config.default_lamination_id = Some("gloss".to_string());

        let out = quote(&ctx, &QuoteArgs { json: true, ..golf_args() }).await.unwrap();
        let breakdown: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(breakdown["total"], 1600.0);

        let args = QuoteArgs {
            json: true,
            no_lamination: true,
            ..golf_args()
        };
        let out = quote(&ctx, &args).await.unwrap();
        let breakdown: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(breakdown["total"], 1500.0);
    }

    #[tokio::test]
    async fn test_unknown_default_lamination_ignored() {
        let mut ctx = test_support::context().await;
        ctx.config.default_lamination_id = Some("satin".to_string());

        let out = quote(&ctx, &QuoteArgs { json: true, ..golf_args() }).await.unwrap();
        let breakdown: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(breakdown["total"], 1500.0);
    }

    #[tokio::test]
    async fn test_incomplete_selection_shows_placeholder() {
        let ctx = test_support::context().await;
        let args = QuoteArgs {
            print: None,
            ..golf_args()
        };

        let out = quote(&ctx, &args).await.unwrap();
        assert_eq!(out, "Total: --\n(select a printMaterial to see a price)");

        let err = quote(&ctx, &QuoteArgs { json: true, ..args }).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SelectionError);
    }

    #[tokio::test]
    async fn test_unknown_option_is_an_error() {
        let ctx = test_support::context().await;
        let args = QuoteArgs {
            options: vec!["spoiler".to_string()],
            ..golf_args()
        };

        let err = quote(&ctx, &args).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SelectionError);
        assert_eq!(err.message, "extraOption[0] not found");
    }
}
