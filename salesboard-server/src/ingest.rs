//! Feed ingestion
//!
//! Fetches the transaction feed once and stores every record with
//! insert-or-ignore semantics. A bad record is logged and skipped; a bad
//! or timed-out fetch abandons the run. Nothing is retried.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DEFAULT_FEED_TIMEOUT;
use crate::db::{InsertOutcome, TransactionRepo};
use crate::models::Transaction;

/// Errors that abandon a whole ingestion run
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to fetch feed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("feed body is not a JSON array (got {found})")]
    NotAnArray { found: &'static str },
}

/// Counts from one ingestion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Records present in the feed
    pub fetched: usize,
    /// Newly stored rows
    pub inserted: usize,
    /// Records whose id was already stored
    pub duplicates: usize,
    /// Records that were malformed or failed to insert
    pub failed: usize,
}

/// Fetches the feed and writes it into the store
#[derive(Debug, Clone)]
pub struct Ingestor {
    client: reqwest::Client,
    feed_url: String,
    timeout: Duration,
}

impl Ingestor {
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), feed_url)
    }

    pub fn with_client(client: reqwest::Client, feed_url: impl Into<String>) -> Self {
        Self {
            client,
            feed_url: feed_url.into(),
            timeout: DEFAULT_FEED_TIMEOUT,
        }
    }

    /// Limit on the whole request, connect through body.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// GET the feed and return its elements unparsed.
    pub async fn fetch(&self) -> Result<Vec<Value>, IngestError> {
        let response = self
            .client
            .get(&self.feed_url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Status {
                url: self.feed_url.clone(),
                status: status.as_u16(),
            });
        }

        match response.json::<Value>().await? {
            Value::Array(items) => Ok(items),
            other => Err(IngestError::NotAnArray {
                found: json_kind(&other),
            }),
        }
    }

    /// Fetch the feed and store it.
    pub async fn run(&self, pool: &SqlitePool) -> Result<IngestReport, IngestError> {
        info!(url = %self.feed_url, "fetching transaction feed");
        let records = self.fetch().await?;
        let report = store_records(pool, records).await;
        info!(
            fetched = report.fetched,
            inserted = report.inserted,
            duplicates = report.duplicates,
            failed = report.failed,
            "ingestion complete"
        );
        Ok(report)
    }
}

/// Store each record independently; failures are logged and counted.
pub async fn store_records(pool: &SqlitePool, records: Vec<Value>) -> IngestReport {
    let repo = TransactionRepo::new(pool);
    let mut report = IngestReport {
        fetched: records.len(),
        ..Default::default()
    };

    for (index, value) in records.into_iter().enumerate() {
        let txn = match Transaction::from_feed(value) {
            Ok(txn) => txn,
            Err(e) => {
                warn!(index, error = %e, "skipping malformed feed record");
                report.failed += 1;
                continue;
            }
        };

        match repo.insert_or_ignore(&txn).await {
            Ok(InsertOutcome::Inserted) => report.inserted += 1,
            Ok(InsertOutcome::Duplicate) => report.duplicates += 1,
            Err(e) => {
                warn!(record_id = txn.id, error = %e, "failed to store feed record");
                report.failed += 1;
            }
        }
    }

    report
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
