//! Record creation, updates, listing and processing.

use crate::db::{DownloadPatch, DownloadRow, NewDownload};
use crate::error::{DatabaseError, Error, LifecycleError, Result};
use crate::resolver::ResolveRequest;
use crate::types::{DownloadId, DownloadInfo, Event, Platform, Status, UserId};

use super::{DownloadManager, PENDING_TITLE};

/// Parameters for creating a new download record
#[derive(Debug, Clone)]
pub struct CreateDownloadRequest {
    /// Source URL as submitted (already classified by the caller)
    pub source_url: String,
    /// Platform derived from the URL
    pub platform: Platform,
    /// Requested container format
    pub format: String,
    /// Requested quality label
    pub quality: Option<String>,
    /// Caller identity, None for anonymous submissions
    pub owner: Option<UserId>,
}

impl DownloadManager {
    /// Create a new download record in the pending state
    ///
    /// Inputs are trusted: URL validation and platform classification are
    /// the API adapter's responsibility, performed before this is called.
    pub async fn create_download(&self, request: CreateDownloadRequest) -> Result<DownloadId> {
        let new_download = NewDownload {
            user_id: request.owner.as_ref().map(|u| u.0.clone()),
            source_url: request.source_url,
            platform: request.platform.as_str().to_string(),
            title: PENDING_TITLE.to_string(),
            format: request.format,
            quality: request.quality,
            status: Status::Pending.to_i32(),
        };

        let id = self.db.insert_download(&new_download).await?;

        tracing::info!(
            download_id = id.0,
            platform = request.platform.as_str(),
            "Download created"
        );
        self.emit(Event::Created {
            id,
            platform: request.platform,
        });

        Ok(id)
    }

    /// Apply a partial update to a download record
    ///
    /// When the patch carries a status change, the monotonic state machine
    /// is enforced here: only `pending → processing`, `pending → failed`,
    /// `processing → completed` and `processing → failed` are accepted, and
    /// terminal records never change status again. Non-status fields merge
    /// freely.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::NotFound`] if `id` does not exist;
    /// [`LifecycleError::InvalidTransition`] for an illegal status change.
    pub async fn update_download(&self, id: DownloadId, patch: DownloadPatch) -> Result<()> {
        if let Some(new_status) = patch.status {
            let current = self
                .db
                .get_download(id)
                .await?
                .ok_or(Error::Lifecycle(LifecycleError::NotFound { id }))?;

            let from = Status::from_i32(current.status);
            let to = Status::from_i32(new_status);
            if !from.can_transition_to(to) {
                return Err(Error::Lifecycle(LifecycleError::InvalidTransition {
                    id,
                    from,
                    to,
                }));
            }
        }

        match self.db.patch_download(id, &patch).await {
            Ok(()) => Ok(()),
            Err(Error::Database(DatabaseError::NotFound(_))) => {
                Err(Error::Lifecycle(LifecycleError::NotFound { id }))
            }
            Err(e) => Err(e),
        }
    }

    /// List the caller's downloads, newest first, capped at the configured
    /// history limit
    ///
    /// An anonymous caller always gets an empty list; anonymous submissions
    /// are accepted but unreachable through history.
    pub async fn list_downloads(&self, owner: Option<&UserId>) -> Result<Vec<DownloadInfo>> {
        let Some(owner) = owner else {
            return Ok(Vec::new());
        };

        let rows = self
            .db
            .list_downloads_for_user(&owner.0, self.config.processing.history_limit)
            .await?;

        Ok(rows.into_iter().map(row_to_info).collect())
    }

    /// Run a download through processing to a terminal state
    ///
    /// Transitions the record to `processing`, invokes the resolver, then
    /// patches the completion fields. Any failure along the way collapses
    /// into a best-effort `failed` patch; the error surfaces only if even
    /// that patch cannot be applied (e.g. the record never existed).
    ///
    /// Completion is observed by re-reading the record; the operation is
    /// fire-and-forget from the submitter's perspective.
    pub async fn process_download(&self, id: DownloadId, request: ResolveRequest) -> Result<()> {
        let outcome = self.run_processing(id, &request).await;

        match outcome {
            Ok(title) => {
                tracing::info!(download_id = id.0, "Download completed");
                self.emit(Event::Completed { id, title });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(download_id = id.0, error = %e, "Processing failed");
                self.emit(Event::Failed { id });

                // Collapse to failed; detail is intentionally not persisted
                self.update_download(id, DownloadPatch::status_only(Status::Failed.to_i32()))
                    .await
            }
        }
    }

    /// The fallible part of processing; returns the resolved title
    async fn run_processing(&self, id: DownloadId, request: &ResolveRequest) -> Result<String> {
        self.update_download(id, DownloadPatch::status_only(Status::Processing.to_i32()))
            .await?;
        self.emit(Event::Processing { id });

        let info = self.resolver.resolve(request).await?;

        let patch = DownloadPatch {
            title: Some(info.title.clone()),
            thumbnail_url: Some(info.thumbnail_url),
            status: Some(Status::Completed.to_i32()),
            result_url: info.result_url,
            file_size_bytes: Some(info.file_size_bytes),
            duration_label: Some(info.duration_label),
        };
        self.update_download(id, patch).await?;

        Ok(info.title)
    }
}

/// Convert a database row into the public view
fn row_to_info(row: DownloadRow) -> DownloadInfo {
    DownloadInfo {
        id: DownloadId(row.id),
        owner_id: row.user_id.map(UserId),
        platform: Platform::from_str_opt(&row.platform).unwrap_or(Platform::Youtube),
        source_url: row.source_url,
        title: row.title,
        thumbnail_url: row.thumbnail_url,
        format: row.format,
        quality: row.quality,
        status: Status::from_i32(row.status),
        result_url: row.result_url,
        file_size_bytes: row.file_size_bytes,
        duration_label: row.duration_label,
        created_at: chrono::DateTime::from_timestamp(row.created_at, 0)
            .unwrap_or_else(chrono::Utc::now),
    }
}
