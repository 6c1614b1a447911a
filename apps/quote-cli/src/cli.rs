//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "wrap-quote", version, about = "Vehicle wrap quote configurator")]
pub struct Cli {
    /// Configuration file (default: ./wrap-quote.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog database path, overrides the configured one
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List vehicles with their coverages and extra options
    Vehicles {
        /// Only vehicles in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// List print and lamination materials and the white-print surcharge
    Materials,

    /// Price one selection
    Quote(QuoteArgs),

    /// Price a JSON file of selections into export rows
    Export(ExportArgs),

    /// Import catalog entities from a JSON file
    Import(ImportArgs),

    /// Show database health and migration status
    Status,
}

#[derive(Args, Debug, Clone, Default)]
pub struct QuoteArgs {
    /// Vehicle id
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Coverage id (must belong to the vehicle)
    #[arg(long)]
    pub coverage: Option<String>,

    /// Extra option id, repeatable
    #[arg(long = "option")]
    pub options: Vec<String>,

    /// Print material id
    #[arg(long)]
    pub print: Option<String>,

    /// Lamination material id (default: configured default lamination)
    #[arg(long, conflicts_with = "no_lamination")]
    pub lamination: Option<String>,

    /// Quote without lamination even if a default is configured
    #[arg(long)]
    pub no_lamination: bool,

    /// Request white print (charged only if the print material allows it)
    #[arg(long)]
    pub white_print: bool,

    /// Emit the cart line JSON instead of the breakdown
    #[arg(long, conflicts_with = "json")]
    pub cart: bool,

    /// Emit the breakdown as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// JSON file holding an array of selections
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON array of quote records
    Json,
    /// Tab-separated rows with a header line
    Table,
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// JSON file with `categories`, `vehicles`, `print_materials`,
    /// `lamination_materials` and optional `white_print`
    pub input: PathBuf,

    /// Report matches without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_quote() {
        let cli = Cli::try_parse_from([
            "wrap-quote",
            "quote",
            "--vehicle",
            "golf",
            "--coverage",
            "full",
            "--option",
            "roof",
            "--option",
            "mirrors",
            "--print",
            "cast",
            "--white-print",
            "--json",
        ])
        .unwrap();

        let Command::Quote(args) = cli.command else {
            panic!("expected quote");
        };
        assert_eq!(args.vehicle.as_deref(), Some("golf"));
        assert_eq!(args.options, vec!["roof", "mirrors"]);
        assert!(args.white_print);
        assert!(args.json);
        assert!(!args.cart);
    }

    #[test]
    fn test_cart_and_json_conflict() {
        let result = Cli::try_parse_from(["wrap-quote", "quote", "--cart", "--json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_export_with_global_db() {
        let cli = Cli::try_parse_from([
            "wrap-quote",
            "export",
            "--input",
            "selections.json",
            "--format",
            "table",
            "--db",
            "/tmp/catalog.db",
        ])
        .unwrap();

        assert_eq!(cli.db, Some(PathBuf::from("/tmp/catalog.db")));
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.format, ExportFormat::Table);
    }
}
