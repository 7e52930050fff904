//! Per-user preference handling.

use crate::db::SettingsRow;
use crate::error::{Error, Result};
use crate::types::{SettingsPatch, UserId, UserSettings};

use super::DownloadManager;

impl DownloadManager {
    /// Get the caller's settings
    ///
    /// Returns the stored row when one exists, defaults otherwise. An
    /// anonymous caller gets defaults; there is nothing to look up.
    pub async fn get_settings(&self, owner: Option<&UserId>) -> Result<UserSettings> {
        let Some(owner) = owner else {
            return Ok(UserSettings::default());
        };

        let row = self.db.get_settings(&owner.0).await?;
        Ok(row.map(row_to_settings).unwrap_or_default())
    }

    /// Apply a partial settings update for the caller
    ///
    /// Starts from the stored row (or defaults when absent), merges the
    /// supplied fields and writes the result back.
    ///
    /// # Errors
    ///
    /// [`Error::Unauthorized`] for an anonymous caller.
    pub async fn update_settings(
        &self,
        owner: Option<&UserId>,
        patch: SettingsPatch,
    ) -> Result<UserSettings> {
        let owner = owner.ok_or(Error::Unauthorized)?;

        let mut settings = self
            .db
            .get_settings(&owner.0)
            .await?
            .map(row_to_settings)
            .unwrap_or_default();

        if let Some(theme) = patch.theme {
            settings.theme = theme;
        }
        if let Some(language) = patch.language {
            settings.language = language;
        }
        if let Some(auto_quality) = patch.auto_quality {
            settings.auto_quality = auto_quality;
        }
        if let Some(notifications) = patch.notifications {
            settings.notifications = notifications;
        }

        let row = SettingsRow {
            user_id: owner.0.clone(),
            theme: settings.theme.clone(),
            language: settings.language.clone(),
            auto_quality: settings.auto_quality as i32,
            notifications: settings.notifications as i32,
        };
        self.db.upsert_settings(&row).await?;

        tracing::debug!(user = %owner, "Settings updated");
        Ok(settings)
    }
}

fn row_to_settings(row: SettingsRow) -> UserSettings {
    UserSettings {
        theme: row.theme,
        language: row.language,
        auto_quality: row.auto_quality != 0,
        notifications: row.notifications != 0,
    }
}
