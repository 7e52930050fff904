//! Per-user settings handlers.

use crate::api::AppState;
use crate::api::auth::CallerIdentity;
use crate::types::{SettingsPatch, UserSettings};
use axum::{Json, extract::State};

/// GET /api/settings - Get the caller's settings
///
/// Returns stored values when present, defaults otherwise (anonymous
/// callers always get defaults).
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Current settings", body = UserSettings),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_settings(
    State(state): State<AppState>,
    CallerIdentity(owner): CallerIdentity,
) -> Result<Json<UserSettings>, crate::Error> {
    let settings = state.manager.get_settings(owner.as_ref()).await?;
    Ok(Json(settings))
}

/// PUT /api/settings - Partially update the caller's settings
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "settings",
    request_body = SettingsPatch,
    responses(
        (status = 200, description = "Updated settings", body = UserSettings),
        (status = 401, description = "Anonymous callers cannot store settings"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_settings(
    State(state): State<AppState>,
    CallerIdentity(owner): CallerIdentity,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<UserSettings>, crate::Error> {
    let settings = state.manager.update_settings(owner.as_ref(), patch).await?;
    Ok(Json(settings))
}
