//! Per-user settings storage.

use crate::error::DatabaseError;
use crate::{Error, Result};

use super::{Database, SettingsRow};

impl Database {
    /// Get a user's settings row, if one exists
    pub async fn get_settings(&self, user_id: &str) -> Result<Option<SettingsRow>> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            SELECT user_id, theme, language, auto_quality, notifications
            FROM settings
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to get settings: {}",
                e
            )))
        })?;

        Ok(row)
    }

    /// Insert or replace a user's settings row
    pub async fn upsert_settings(&self, row: &SettingsRow) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (user_id, theme, language, auto_quality, notifications)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (user_id) DO UPDATE SET
                theme = excluded.theme,
                language = excluded.language,
                auto_quality = excluded.auto_quality,
                notifications = excluded.notifications
            "#,
        )
        .bind(&row.user_id)
        .bind(&row.theme)
        .bind(&row.language)
        .bind(row.auto_quality)
        .bind(row.notifications)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to upsert settings: {}",
                e
            )))
        })?;

        Ok(())
    }
}
