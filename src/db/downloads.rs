//! Download record CRUD operations.

use crate::error::DatabaseError;
use crate::types::DownloadId;
use crate::{Error, Result};

use super::{Database, DownloadRow, NewDownload};

/// Partial update for a download record
///
/// Only populated fields are written; `None` fields keep their prior value.
/// Status is carried as the raw integer code; transition legality is the
/// lifecycle manager's concern, not the store's.
#[derive(Debug, Clone, Default)]
pub struct DownloadPatch {
    /// New display title
    pub title: Option<String>,
    /// New thumbnail reference
    pub thumbnail_url: Option<String>,
    /// New status code
    pub status: Option<i32>,
    /// New artifact URL
    pub result_url: Option<String>,
    /// New size in bytes
    pub file_size_bytes: Option<i64>,
    /// New duration label
    pub duration_label: Option<String>,
}

impl DownloadPatch {
    /// Patch that only changes the status
    pub fn status_only(status: i32) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Database {
    /// Insert a new download record
    pub async fn insert_download(&self, download: &NewDownload) -> Result<DownloadId> {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO downloads (
                user_id, source_url, platform, title, format,
                quality, status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&download.user_id)
        .bind(&download.source_url)
        .bind(&download.platform)
        .bind(&download.title)
        .bind(&download.format)
        .bind(&download.quality)
        .bind(download.status)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to insert download: {}",
                e
            )))
        })?;

        Ok(DownloadId(result.last_insert_rowid()))
    }

    /// Get a download by ID
    pub async fn get_download(&self, id: DownloadId) -> Result<Option<DownloadRow>> {
        let row = sqlx::query_as::<_, DownloadRow>(
            r#"
            SELECT
                id, user_id, source_url, platform, title, thumbnail_url,
                format, quality, status, result_url, file_size_bytes,
                duration_label, created_at
            FROM downloads
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to get download: {}",
                e
            )))
        })?;

        Ok(row)
    }

    /// Apply a partial update to a download record
    ///
    /// Fails with [`DatabaseError::NotFound`] if `id` does not reference an
    /// existing record.
    pub async fn patch_download(&self, id: DownloadId, patch: &DownloadPatch) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE downloads SET
                title = COALESCE(?, title),
                thumbnail_url = COALESCE(?, thumbnail_url),
                status = COALESCE(?, status),
                result_url = COALESCE(?, result_url),
                file_size_bytes = COALESCE(?, file_size_bytes),
                duration_label = COALESCE(?, duration_label)
            WHERE id = ?
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.thumbnail_url)
        .bind(patch.status)
        .bind(&patch.result_url)
        .bind(patch.file_size_bytes)
        .bind(&patch.duration_label)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to patch download: {}",
                e
            )))
        })?;

        if result.rows_affected() == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "download {}",
                id
            ))));
        }

        Ok(())
    }

    /// List a user's downloads, newest first, capped at `limit`
    pub async fn list_downloads_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<DownloadRow>> {
        let rows = sqlx::query_as::<_, DownloadRow>(
            r#"
            SELECT
                id, user_id, source_url, platform, title, thumbnail_url,
                format, quality, status, result_url, file_size_bytes,
                duration_label, created_at
            FROM downloads
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to list downloads: {}",
                e
            )))
        })?;

        Ok(rows)
    }
}
