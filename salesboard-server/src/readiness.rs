//! Readiness gate between the ingestor and the data endpoints
//!
//! Data endpoints wait until the startup ingestion has finished, whatever
//! its outcome, so they never answer from a half-seeded table.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::ingest::IngestReport;

/// Where the startup ingestion currently stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IngestStatus {
    Pending,
    Completed { report: IngestReport },
    Failed { reason: String },
    Skipped,
}

impl IngestStatus {
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Cloneable handle shared by the ingest task and the router state
#[derive(Clone)]
pub struct Readiness {
    tx: Arc<watch::Sender<IngestStatus>>,
}

impl Readiness {
    /// A gate that stays closed until [`Readiness::settle`] is called.
    pub fn pending() -> Self {
        let (tx, _rx) = watch::channel(IngestStatus::Pending);
        Self { tx: Arc::new(tx) }
    }

    /// A gate that is already open, for serving without ingestion.
    pub fn ready() -> Self {
        let gate = Self::pending();
        gate.settle(IngestStatus::Skipped);
        gate
    }

    /// Record the ingestion outcome and release every waiter.
    pub fn settle(&self, status: IngestStatus) {
        self.tx.send_replace(status);
    }

    pub fn status(&self) -> IngestStatus {
        self.tx.borrow().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.tx.borrow().is_settled()
    }

    /// Resolve once ingestion has settled.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(IngestStatus::is_settled).await;
    }
}
