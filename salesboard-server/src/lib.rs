//! salesboard-server: transaction feed ingestion and sales analytics
//!
//! Pulls a JSON product-transaction feed into SQLite once at startup and
//! serves read-only aggregates (monthly statistics, price-range buckets,
//! category breakdown) over HTTP.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod ingest;
pub mod models;
pub mod readiness;

pub use config::ServerConfig;
pub use error::{Error, Result};

use sqlx::SqlitePool;

use crate::http::AppState;
use crate::ingest::Ingestor;
use crate::readiness::{IngestStatus, Readiness};

/// Open the store, ensure the table exists, and start the HTTP server.
///
/// Store failures are returned before anything binds. Ingestion runs in the
/// background; data endpoints wait for it, and its failure is only logged.
/// The pool is closed once the server has shut down.
pub async fn serve(config: ServerConfig) -> Result<()> {
    config.validate()?;

    let pool = open_store(&config).await?;
    let readiness = start_ingestion(&config, &pool);
    let state = AppState::new(pool.clone(), readiness);

    let result = http::run_server(state, &config).await;
    pool.close().await;
    result.map_err(Error::from)
}

/// Create the pool and the transaction table.
pub async fn open_store(config: &ServerConfig) -> Result<SqlitePool> {
    let pool = db::create_pool_with_options(&config.database_url, config.max_connections).await?;
    db::ensure_schema(&pool).await?;
    tracing::info!(database = %config.database_url, "store ready");
    Ok(pool)
}

/// Spawn the one-shot ingestion, returning the gate it will open.
pub fn start_ingestion(config: &ServerConfig, pool: &SqlitePool) -> Readiness {
    if !config.ingest_on_start {
        tracing::info!("startup ingestion disabled");
        return Readiness::ready();
    }

    let readiness = Readiness::pending();
    let gate = readiness.clone();
    let pool = pool.clone();
    let ingestor = Ingestor::new(config.feed_url.clone()).with_timeout(config.feed_timeout);

    tokio::spawn(async move {
        let status = match ingestor.run(&pool).await {
            Ok(report) => IngestStatus::Completed { report },
            Err(e) => {
                tracing::error!(url = %ingestor.feed_url(), error = %e, "ingestion abandoned");
                IngestStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };
        gate.settle(status);
    });

    readiness
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unopenable(dir: &tempfile::TempDir) -> ServerConfig {
        ServerConfig {
            database_url: format!(
                "sqlite://{}",
                dir.path().join("missing").join("x.db").display()
            ),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            ingest_on_start: false,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn open_store_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = open_store(&unopenable(&dir)).await;
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn serve_stops_before_binding_when_store_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = serve(unopenable(&dir)).await;
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn serve_rejects_invalid_config() {
        let config = ServerConfig {
            database_url: "postgres://localhost/sales".into(),
            ..Default::default()
        };
        assert!(matches!(serve(config).await, Err(Error::Config(_))));
    }
}
