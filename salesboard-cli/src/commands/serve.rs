//! HTTP server command

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use salesboard_server::config::{DEFAULT_FEED_TIMEOUT, DEFAULT_FEED_URL};
use salesboard_server::{serve, ServerConfig};

use super::StoreArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "SALESBOARD_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Transaction feed to ingest on startup
    #[arg(long, env = "SALESBOARD_FEED_URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Give up on the feed request after this many seconds
    #[arg(long, env = "SALESBOARD_FEED_TIMEOUT", default_value_t = DEFAULT_FEED_TIMEOUT.as_secs())]
    pub feed_timeout_secs: u64,

    /// Serve whatever is already stored without fetching the feed
    #[arg(long)]
    pub no_ingest: bool,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    fn config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            feed_url: self.feed_url.clone(),
            feed_timeout: Duration::from_secs(self.feed_timeout_secs),
            ingest_on_start: !self.no_ingest,
            cors_permissive: self.cors_permissive,
            ..self.store.config()
        }
    }
}

/// Run the HTTP server (blocks until shutdown)
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting salesboard server on {}", args.bind);

    serve(args.config()).await.context("Server error")?;

    Ok(())
}
