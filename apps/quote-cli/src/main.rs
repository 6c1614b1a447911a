//! # wrap-quote Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Load configuration (defaults → `wrap-quote.toml` → `WRAP_QUOTE__*`)
//! 3. Initialize tracing
//! 4. Open the catalog store & run migrations
//! 5. Dispatch the subcommand and print its output

use clap::Parser;

use wrap_quote::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let output = wrap_quote::run(cli).await?;

    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
