//! # vidgrab-dl
//!
//! Backend library for a multi-platform video download service.
//!
//! Accepts video URLs from YouTube, TikTok, Instagram, and Facebook,
//! classifies them, and drives each submission through a persisted
//! download lifecycle. Media acquisition is pluggable behind the
//! [`MediaResolver`] trait; the bundled [`SimulatedResolver`] fabricates
//! plausible metadata so the full stack can run without network access.
//!
//! ## Design Philosophy
//!
//! vidgrab-dl is designed to be:
//! - **Library-first** - The REST server is a thin layer over the same
//!   [`DownloadManager`] methods an embedding application calls directly
//! - **Sensible defaults** - Works out of the box with zero configuration
//! - **Event-driven** - Consumers subscribe to lifecycle events, no polling
//! - **Swappable acquisition** - Real downloaders slot in behind a trait
//!
//! ## Quick Start
//!
//! ```no_run
//! use vidgrab_dl::{Config, CreateDownloadRequest, DownloadManager, Platform, ResolveRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         database_path: "./vidgrab.db".into(),
//!         ..Default::default()
//!     };
//!
//!     let manager = DownloadManager::new(config).await?;
//!
//!     // Subscribe to lifecycle events
//!     let mut events = manager.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let id = manager
//!         .create_download(CreateDownloadRequest {
//!             source_url: "https://youtu.be/abc123".to_string(),
//!             platform: Platform::Youtube,
//!             format: "mp4".to_string(),
//!             quality: Some("720p".to_string()),
//!             owner: None,
//!         })
//!         .await?;
//!     manager
//!         .process_download(
//!             id,
//!             ResolveRequest {
//!                 source_url: "https://youtu.be/abc123".to_string(),
//!                 platform: Platform::Youtube,
//!                 format: "mp4".to_string(),
//!                 quality: Some("720p".to_string()),
//!             },
//!         )
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Database persistence layer
pub mod db;
/// Error types
pub mod error;
/// Download and settings lifecycle orchestration
pub mod lifecycle;
/// Media resolution (metadata acquisition) behind a trait
pub mod resolver;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, Config, ProcessingConfig};
pub use db::Database;
pub use error::{
    ApiError, DatabaseError, Error, ErrorDetail, LifecycleError, Result, ToHttpStatus,
};
pub use lifecycle::{CreateDownloadRequest, DownloadManager};
pub use resolver::{MediaInfo, MediaResolver, ResolveRequest, SimulatedResolver};
pub use types::{
    DownloadId, DownloadInfo, Event, Platform, PlatformInfo, SettingsPatch, Status, UserId,
    UserSettings,
};

/// Helper function to run the manager with graceful signal handling.
///
/// Waits for a termination signal and then calls the manager's `shutdown()` method.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use vidgrab_dl::{Config, DownloadManager, run_with_shutdown};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::default();
///     let manager = DownloadManager::new(config).await?;
///
///     // Run with automatic signal handling
///     run_with_shutdown(manager).await?;
///
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(manager: DownloadManager) -> Result<()> {
    wait_for_signal().await;
    manager.shutdown().await
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
