//! Database layer for vidgrab-dl
//!
//! Handles SQLite persistence for download records and user settings.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by domain:
//! - [`migrations`] — Database lifecycle, schema migrations
//! - [`downloads`] — Download record CRUD and owner-keyed listing
//! - [`settings`] — Per-user settings storage

use sqlx::{FromRow, sqlite::SqlitePool};

mod downloads;
mod migrations;
mod settings;

pub use downloads::DownloadPatch;

/// New download record to be inserted into the database
#[derive(Debug, Clone)]
pub struct NewDownload {
    /// Owning user id, None for anonymous submissions
    pub user_id: Option<String>,
    /// Source URL as submitted
    pub source_url: String,
    /// Platform identifier ("youtube", "tiktok", ...)
    pub platform: String,
    /// Display title (sentinel "Processing..." until completion)
    pub title: String,
    /// Caller-supplied container format
    pub format: String,
    /// Caller-supplied quality label
    pub quality: Option<String>,
    /// Initial status code (0 = pending)
    pub status: i32,
}

/// Download record from database
#[derive(Debug, Clone, FromRow)]
pub struct DownloadRow {
    /// Unique database ID
    pub id: i64,
    /// Owning user id, NULL for anonymous submissions
    pub user_id: Option<String>,
    /// Source URL as submitted
    pub source_url: String,
    /// Platform identifier ("youtube", "tiktok", ...)
    pub platform: String,
    /// Display title
    pub title: String,
    /// Thumbnail reference, set on completion
    pub thumbnail_url: Option<String>,
    /// Caller-supplied container format
    pub format: String,
    /// Caller-supplied quality label
    pub quality: Option<String>,
    /// Status code (0=pending, 1=processing, 2=completed, 3=failed)
    pub status: i32,
    /// Artifact URL if the resolver produced one
    pub result_url: Option<String>,
    /// Size in bytes, set on completion
    pub file_size_bytes: Option<i64>,
    /// Duration label ("M:SS"), set on completion
    pub duration_label: Option<String>,
    /// Unix timestamp when the record was created
    pub created_at: i64,
}

/// Settings record from database
#[derive(Debug, Clone, FromRow)]
pub struct SettingsRow {
    /// Owning user id (primary key)
    pub user_id: String,
    /// UI theme
    pub theme: String,
    /// Preferred language code
    pub language: String,
    /// Pick quality automatically (0 = no, 1 = yes)
    pub auto_quality: i32,
    /// Desktop notifications enabled (0 = no, 1 = yes)
    pub notifications: i32,
}

/// Database handle for vidgrab-dl
pub struct Database {
    pool: SqlitePool,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
