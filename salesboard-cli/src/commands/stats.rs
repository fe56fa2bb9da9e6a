//! Offline monthly analytics

use anyhow::{Context, Result};
use clap::Parser;

use salesboard_server::db::TransactionRepo;
use salesboard_server::models::Month;
use salesboard_server::open_store;

use super::StoreArgs;

/// Arguments for the stats command
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Month to report on (`03`, `3` or `March`)
    #[arg(long, short = 'm')]
    pub month: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Print the combined statistics / bar chart / pie chart view.
pub async fn run_stats(args: StatsArgs) -> Result<()> {
    let month = Month::parse(&args.month);
    if month == Month::NONE {
        tracing::warn!(month = %args.month, "not a recognizable month; nothing will match");
    }

    let config = args.store.config();
    config.validate().context("Invalid configuration")?;
    let pool = open_store(&config)
        .await
        .context("Failed to open transaction store")?;

    let combined = TransactionRepo::new(&pool).combined(month).await;
    pool.close().await;
    let combined = combined.context("Failed to compute statistics")?;

    println!("{}", serde_json::to_string_pretty(&combined)?);
    Ok(())
}
