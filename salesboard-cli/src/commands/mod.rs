//! Command implementations for the salesboard CLI

pub mod ingest;
pub mod serve;
pub mod stats;

pub use ingest::run_ingest;
pub use serve::run_serve;
pub use stats::run_stats;

use clap::Args;
use salesboard_server::config::{DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS};
use salesboard_server::ServerConfig;

/// Store location shared by every command
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// SQLite database URL (`sqlite::memory:` for a throwaway store)
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl StoreArgs {
    /// Start from defaults and apply the store settings.
    pub fn config(&self) -> ServerConfig {
        ServerConfig {
            database_url: self.database_url.clone(),
            max_connections: self.max_connections,
            ..Default::default()
        }
    }
}
