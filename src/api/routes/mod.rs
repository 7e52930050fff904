//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`downloads`] — Download submission and history
//! - [`settings`] — Per-user preferences
//! - [`system`] — Health, platform catalog, OpenAPI, events

use serde::{Deserialize, Serialize};

mod downloads;
mod settings;
mod system;

// Re-export all handlers so `routes::function_name` continues to work
pub use downloads::*;
pub use settings::*;
pub use system::*;

// ============================================================================
// Request/Response Types (shared across handlers)
// ============================================================================

/// Request body for POST /api/download
///
/// `url` is modelled as optional so an empty body deserializes and can be
/// answered with the contract's "URL is required" message instead of a
/// generic deserialization rejection.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SubmitDownloadRequest {
    /// Video URL to download (required)
    #[serde(default)]
    pub url: Option<String>,
    /// Container format (default: "mp4")
    #[serde(default = "default_format")]
    pub format: String,
    /// Quality label (default: "720p")
    #[serde(default = "default_quality")]
    pub quality: String,
}

/// Response body for a successful POST /api/download
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SubmitDownloadResponse {
    /// Always true on the success path
    pub success: bool,
    /// Identifier of the created record
    #[serde(rename = "downloadId")]
    pub download_id: crate::types::DownloadId,
    /// Human-readable confirmation
    pub message: String,
}

fn default_format() -> String {
    "mp4".to_string()
}

fn default_quality() -> String {
    "720p".to_string()
}
