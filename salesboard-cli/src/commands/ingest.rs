//! One-shot ingestion command

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use salesboard_server::config::{DEFAULT_FEED_TIMEOUT, DEFAULT_FEED_URL};
use salesboard_server::ingest::Ingestor;
use salesboard_server::open_store;

use super::StoreArgs;

/// Arguments for the ingest command
#[derive(Parser, Debug)]
pub struct IngestArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Transaction feed to fetch
    #[arg(long, env = "SALESBOARD_FEED_URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Give up on the feed request after this many seconds
    #[arg(long, env = "SALESBOARD_FEED_TIMEOUT", default_value_t = DEFAULT_FEED_TIMEOUT.as_secs())]
    pub feed_timeout_secs: u64,
}

/// Fetch the feed, store it, and print the report as JSON.
pub async fn run_ingest(args: IngestArgs) -> Result<()> {
    let config = salesboard_server::ServerConfig {
        feed_url: args.feed_url,
        feed_timeout: Duration::from_secs(args.feed_timeout_secs),
        ..args.store.config()
    };
    config.validate().context("Invalid configuration")?;

    let pool = open_store(&config)
        .await
        .context("Failed to open transaction store")?;

    let result = Ingestor::new(config.feed_url.clone())
        .with_timeout(config.feed_timeout)
        .run(&pool)
        .await;
    pool.close().await;
    let report = result.context("Ingestion failed")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
