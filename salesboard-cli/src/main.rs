//! salesboard CLI - transaction feed ingestion and sales analytics
//!
//! - `serve`: open the store, ingest the feed in the background, serve the API
//! - `ingest`: one-shot feed ingestion, prints the report
//! - `stats`: print one month's combined analytics straight from the store

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "salesboard",
    author,
    version,
    about = "Ingest a product-transaction feed into SQLite and serve monthly sales analytics"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API (ingests the feed on startup)
    Serve(commands::serve::ServeArgs),
    /// Fetch the feed once and store new transactions
    Ingest(commands::ingest::IngestArgs),
    /// Print statistics, bar chart and pie chart for a month
    Stats(commands::stats::StatsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from the working directory if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Ingest(args) => commands::run_ingest(args).await,
        Commands::Stats(args) => commands::run_stats(args).await,
    }
}
