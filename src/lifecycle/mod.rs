//! Download lifecycle management split into focused submodules.
//!
//! The `DownloadManager` struct and its methods are organized by domain:
//! - [`downloads`] - Record creation, updates, listing and processing
//! - [`settings`] - Per-user preference handling
//!
//! The manager owns the `downloads` record type outright: the store persists
//! rows but never interprets them, and every status change funnels through
//! [`DownloadManager::update_download`], which enforces the monotonic
//! `pending → processing → {completed, failed}` state machine.

mod downloads;
mod settings;

pub use downloads::CreateDownloadRequest;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::resolver::{MediaResolver, SimulatedResolver};
use crate::types::Event;

/// Sentinel title carried by a record until processing completes
pub const PENDING_TITLE: &str = "Processing...";

/// Main lifecycle manager instance (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct DownloadManager {
    /// Database instance for persistence (wrapped in Arc for sharing across tasks)
    /// Public for integration tests to query download status
    pub db: Arc<Database>,
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub config: Arc<Config>,
    /// Media resolver behind a capability trait (simulated by default)
    pub(crate) resolver: Arc<dyn MediaResolver>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
}

impl DownloadManager {
    /// Create a new manager with the simulated resolver
    ///
    /// Opens (or creates) the configured SQLite database and runs
    /// migrations.
    pub async fn new(config: Config) -> Result<Self> {
        let resolver = Arc::new(SimulatedResolver::new(
            config.processing.simulated_latency(),
        ));
        Self::with_resolver(config, resolver).await
    }

    /// Create a new manager with a caller-supplied resolver
    ///
    /// This is the seam for real provider integrations (and for tests that
    /// need deterministic or failing resolution).
    pub async fn with_resolver(config: Config, resolver: Arc<dyn MediaResolver>) -> Result<Self> {
        let db = Database::new(&config.database_path).await?;
        let (event_tx, _) = tokio::sync::broadcast::channel(256);

        tracing::info!(
            database = %config.database_path.display(),
            "Download manager initialized"
        );

        Ok(Self {
            db: Arc::new(db),
            config: Arc::new(config),
            resolver,
            event_tx,
        })
    }

    /// Subscribe to lifecycle events
    ///
    /// Events are best-effort: a slow subscriber may observe lagging and
    /// missed events, never blocked producers.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Gracefully shut down the manager and close database connections
    pub async fn shutdown(&self) -> Result<()> {
        tracing::info!("Shutting down download manager");
        self.db.close().await;
        Ok(())
    }

    pub(crate) fn emit(&self, event: Event) {
        // No subscribers is fine; drop the event
        let _ = self.event_tx.send(event);
    }
}
