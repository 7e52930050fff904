//! Shared helpers for lifecycle and API tests.

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::resolver::{MediaInfo, MediaResolver, ResolveRequest};

use super::DownloadManager;

/// Create a manager backed by a temp-dir SQLite file with zero simulated
/// latency
pub(crate) async fn create_test_manager() -> (DownloadManager, TempDir) {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = test_config(&temp_dir);
    let manager = DownloadManager::new(config)
        .await
        .expect("failed to create manager");
    (manager, temp_dir)
}

/// Create a manager whose resolver always fails
pub(crate) async fn create_failing_manager() -> (DownloadManager, TempDir) {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = test_config(&temp_dir);
    let manager = DownloadManager::with_resolver(config, Arc::new(FailingResolver))
        .await
        .expect("failed to create manager");
    (manager, temp_dir)
}

pub(crate) fn test_config(temp_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.database_path = temp_dir.path().join("test.db");
    config.processing.simulated_latency_ms = 0;
    config
}

/// Resolver that always errors, for exercising the failed path
pub(crate) struct FailingResolver;

#[async_trait]
impl MediaResolver for FailingResolver {
    async fn resolve(&self, _request: &ResolveRequest) -> Result<MediaInfo> {
        Err(Error::Resolve("simulated provider outage".to_string()))
    }
}
