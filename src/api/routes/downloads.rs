//! Download submission and history handlers.

use super::{SubmitDownloadRequest, SubmitDownloadResponse};
use crate::api::AppState;
use crate::api::auth::CallerIdentity;
use crate::lifecycle::CreateDownloadRequest;
use crate::resolver::ResolveRequest;
use crate::types::{DownloadInfo, Platform};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// POST /api/download - Submit a video URL for download
///
/// Legacy external contract: flat error bodies and a synchronous wait for
/// processing to reach a terminal state before responding. Success does not
/// imply the download completed, only that processing ran; callers observe
/// the outcome through the history listing.
#[utoipa::path(
    post,
    path = "/api/download",
    tag = "downloads",
    request_body = SubmitDownloadRequest,
    responses(
        (status = 200, description = "Download accepted and processed", body = SubmitDownloadResponse),
        (status = 400, description = "Missing URL or unsupported platform"),
        (status = 500, description = "Processing could not be started")
    )
)]
pub async fn submit_download(
    State(state): State<AppState>,
    CallerIdentity(owner): CallerIdentity,
    Json(request): Json<SubmitDownloadRequest>,
) -> Response {
    let url = match request.url.as_deref() {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => {
            return (StatusCode::BAD_REQUEST, Json(json!({"error": "URL is required"})))
                .into_response();
        }
    };

    let Some(platform) = Platform::detect(&url) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Unsupported platform"})),
        )
            .into_response();
    };

    let create = CreateDownloadRequest {
        source_url: url.clone(),
        platform,
        format: request.format.clone(),
        quality: Some(request.quality.clone()),
        owner,
    };

    let download_id = match state.manager.create_download(create).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create download record");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to process download"})),
            )
                .into_response();
        }
    };

    let resolve = ResolveRequest {
        source_url: url,
        platform,
        format: request.format,
        quality: Some(request.quality),
    };

    // Awaited to completion; resolver failures are absorbed into the record
    // state, so an Err here means the record itself could not be updated.
    if let Err(e) = state.manager.process_download(download_id, resolve).await {
        tracing::error!(download_id = download_id.0, error = %e, "Failed to process download");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to process download"})),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(SubmitDownloadResponse {
            success: true,
            download_id,
            message: "Download started successfully".to_string(),
        }),
    )
        .into_response()
}

/// GET /api/downloads - List the caller's download history
#[utoipa::path(
    get,
    path = "/api/downloads",
    tag = "downloads",
    responses(
        (status = 200, description = "Download history, newest first, at most 50 records", body = Vec<DownloadInfo>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_downloads(
    State(state): State<AppState>,
    CallerIdentity(owner): CallerIdentity,
) -> Result<Json<Vec<DownloadInfo>>, crate::Error> {
    let downloads = state.manager.list_downloads(owner.as_ref()).await?;
    Ok(Json(downloads))
}
