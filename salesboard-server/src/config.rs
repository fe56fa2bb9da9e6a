//! Service configuration

use std::net::SocketAddr;
use std::time::Duration;

/// Public feed the service was built against.
pub const DEFAULT_FEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Default on-disk database, created next to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://transaction.db";

/// Default pool size. A single writer and a handful of readers.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default limit on the whole feed request. A feed that never answers would
/// otherwise keep the data endpoints waiting forever.
pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(30);

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3000)
    pub bind_addr: SocketAddr,

    /// SQLite connection string, `sqlite::memory:` for a throwaway store
    pub database_url: String,

    /// Where the transaction feed is fetched from
    pub feed_url: String,

    /// Give up on the feed request after this long (default: 30s)
    pub feed_timeout: Duration,

    /// Fetch and store the feed before serving data (default: true)
    pub ingest_on_start: bool,

    /// Allow permissive CORS (default: false = localhost only)
    pub cors_permissive: bool,

    /// Maximum pooled connections
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            feed_url: DEFAULT_FEED_URL.to_string(),
            feed_timeout: DEFAULT_FEED_TIMEOUT,
            ingest_on_start: true,
            cors_permissive: false,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("feed url must use http or https: {0}")]
    InvalidFeedUrl(String),

    #[error("database url must start with 'sqlite:': {0}")]
    InvalidDatabaseUrl(String),

    #[error("max_connections must be at least 1")]
    NoConnections,

    #[error("feed timeout must be greater than zero")]
    ZeroFeedTimeout,
}

impl ServerConfig {
    /// Check the settings that would otherwise only fail deep inside startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.feed_url.starts_with("http://") || self.feed_url.starts_with("https://")) {
            return Err(ConfigError::InvalidFeedUrl(self.feed_url.clone()));
        }
        if !self.database_url.starts_with("sqlite:") {
            return Err(ConfigError::InvalidDatabaseUrl(self.database_url.clone()));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::NoConnections);
        }
        if self.feed_timeout.is_zero() {
            return Err(ConfigError::ZeroFeedTimeout);
        }
        Ok(())
    }
}
