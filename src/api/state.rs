//! Application state for the API server

use crate::{Config, DownloadManager};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// This struct is cloned for each request (cheap Arc clone) and provides
/// access to the lifecycle manager and configuration.
#[derive(Clone)]
pub struct AppState {
    /// The main DownloadManager instance
    pub manager: Arc<DownloadManager>,

    /// Configuration (for read access)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(manager: Arc<DownloadManager>, config: Arc<Config>) -> Self {
        Self { manager, config }
    }
}
