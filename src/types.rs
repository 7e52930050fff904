//! Core types and events for vidgrab-dl

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a download record
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct DownloadId(pub i64);

impl std::fmt::Display for DownloadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Implement sqlx Type, Encode, and Decode for database operations
impl sqlx::Type<sqlx::Sqlite> for DownloadId {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for DownloadId {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        sqlx::Encode::<sqlx::Sqlite>::encode_by_ref(&self.0, buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for DownloadId {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <i64 as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self(id))
    }
}

/// Opaque identity of an authenticated caller
///
/// Identity resolution happens at the API boundary (trusted `X-User-Id`
/// header); everything below the API takes it as an explicit parameter
/// instead of reading ambient request state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported source platform, derived from the submitted URL
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// youtube.com / youtu.be
    Youtube,
    /// tiktok.com
    Tiktok,
    /// instagram.com
    Instagram,
    /// facebook.com / fb.watch
    Facebook,
}

impl Platform {
    /// Detect the platform from a raw URL string.
    ///
    /// Pure substring classification; the single source of truth shared by
    /// the REST adapter and any embedding UI so the two can never drift.
    /// Returns `None` for anything that is not one of the four supported
    /// platforms.
    pub fn detect(url: &str) -> Option<Platform> {
        if url.contains("youtube.com") || url.contains("youtu.be") {
            Some(Platform::Youtube)
        } else if url.contains("tiktok.com") {
            Some(Platform::Tiktok)
        } else if url.contains("instagram.com") {
            Some(Platform::Instagram)
        } else if url.contains("facebook.com") || url.contains("fb.watch") {
            Some(Platform::Facebook)
        } else {
            None
        }
    }

    /// Stable lowercase identifier used in the database and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
        }
    }

    /// Parse the stable identifier back into a platform
    pub fn from_str_opt(s: &str) -> Option<Platform> {
        match s {
            "youtube" => Some(Platform::Youtube),
            "tiktok" => Some(Platform::Tiktok),
            "instagram" => Some(Platform::Instagram),
            "facebook" => Some(Platform::Facebook),
            _ => None,
        }
    }

    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Youtube => "YouTube",
            Platform::Tiktok => "TikTok",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
        }
    }

    /// Container formats offered for this platform
    pub fn formats(&self) -> &'static [&'static str] {
        match self {
            Platform::Youtube => &["mp4", "mp3"],
            _ => &["mp4"],
        }
    }

    /// Quality labels offered for this platform
    pub fn qualities(&self) -> &'static [&'static str] {
        match self {
            Platform::Youtube => &["144p", "360p", "720p", "1080p", "1440p", "2160p"],
            _ => &["360p", "720p", "1080p"],
        }
    }

    /// All supported platforms
    pub fn all() -> &'static [Platform] {
        &[
            Platform::Youtube,
            Platform::Tiktok,
            Platform::Instagram,
            Platform::Facebook,
        ]
    }
}

/// Download lifecycle status
///
/// Transitions are strictly forward: `Pending → Processing → {Completed,
/// Failed}` (a pre-processing crash may also take `Pending → Failed`).
/// Terminal states never transition again. [`DownloadManager::update_download`]
/// rejects anything else.
///
/// [`DownloadManager::update_download`]: crate::lifecycle::DownloadManager::update_download
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Created, not yet picked up for processing
    Pending,
    /// Resolver is running
    Processing,
    /// Successfully completed, result metadata populated
    Completed,
    /// Failed during processing
    Failed,
}

impl Status {
    /// Convert integer status code to Status enum
    pub fn from_i32(status: i32) -> Self {
        match status {
            0 => Status::Pending,
            1 => Status::Processing,
            2 => Status::Completed,
            3 => Status::Failed,
            _ => Status::Failed, // Default to Failed for unknown status
        }
    }

    /// Convert Status enum to integer status code
    pub fn to_i32(&self) -> i32 {
        match self {
            Status::Pending => 0,
            Status::Processing => 1,
            Status::Completed => 2,
            Status::Failed => 3,
        }
    }

    /// Whether this status is terminal (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed | Status::Failed)
    }

    /// Whether a transition from `self` to `next` is allowed by the
    /// monotonic state machine
    pub fn can_transition_to(&self, next: Status) -> bool {
        matches!(
            (self, next),
            (Status::Pending, Status::Processing)
                | (Status::Pending, Status::Failed)
                | (Status::Processing, Status::Completed)
                | (Status::Processing, Status::Failed)
        )
    }

    /// Stable lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Processing => "processing",
            Status::Completed => "completed",
            Status::Failed => "failed",
        }
    }
}

/// Public view of a download record, as returned by the API and
/// [`DownloadManager::list_downloads`]
///
/// [`DownloadManager::list_downloads`]: crate::lifecycle::DownloadManager::list_downloads
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadInfo {
    /// Record identifier
    pub id: DownloadId,
    /// Owning user, absent for anonymous submissions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    /// Source URL as submitted
    pub source_url: String,
    /// Platform derived from the URL at submission time
    pub platform: Platform,
    /// Display title ("Processing..." until completion)
    pub title: String,
    /// Thumbnail reference, set on completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Caller-supplied container format ("mp4", "mp3")
    pub format: String,
    /// Caller-supplied quality label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// Lifecycle status
    pub status: Status,
    /// Artifact URL, populated only when the resolver produces one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
    /// Size in bytes, set on completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size_bytes: Option<i64>,
    /// Duration label ("M:SS"), set on completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_label: Option<String>,
    /// Creation time
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Static platform catalog entry for GET /api/platforms
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PlatformInfo {
    /// Stable lowercase identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Offered container formats
    pub formats: Vec<String>,
    /// Offered quality labels
    pub qualities: Vec<String>,
}

impl PlatformInfo {
    /// Build the catalog entry for a platform
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            id: platform.as_str().to_string(),
            name: platform.display_name().to_string(),
            formats: platform.formats().iter().map(|s| s.to_string()).collect(),
            qualities: platform.qualities().iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Per-user preferences
///
/// Defaults are returned whenever no row exists for the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// UI theme: "light", "dark" or "system"
    pub theme: String,
    /// Preferred language code
    pub language: String,
    /// Pick quality automatically
    pub auto_quality: bool,
    /// Desktop notifications enabled
    pub notifications: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: "system".to_string(),
            language: "en".to_string(),
            auto_quality: true,
            notifications: true,
        }
    }
}

/// Partial settings update; omitted fields keep their prior values
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    /// New theme, if changing
    #[serde(default)]
    pub theme: Option<String>,
    /// New language, if changing
    #[serde(default)]
    pub language: Option<String>,
    /// New auto-quality flag, if changing
    #[serde(default)]
    pub auto_quality: Option<bool>,
    /// New notifications flag, if changing
    #[serde(default)]
    pub notifications: Option<bool>,
}

/// Lifecycle events broadcast by [`DownloadManager`]
///
/// Consumers subscribe via [`DownloadManager::subscribe`]; the API exposes
/// the same stream over SSE at `GET /api/events`.
///
/// [`DownloadManager`]: crate::lifecycle::DownloadManager
/// [`DownloadManager::subscribe`]: crate::lifecycle::DownloadManager::subscribe
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A download record was created
    Created {
        /// Record identifier
        id: DownloadId,
        /// Platform of the submission
        platform: Platform,
    },
    /// Processing started
    Processing {
        /// Record identifier
        id: DownloadId,
    },
    /// Processing finished successfully
    Completed {
        /// Record identifier
        id: DownloadId,
        /// Resolved display title
        title: String,
    },
    /// Processing failed
    Failed {
        /// Record identifier
        id: DownloadId,
    },
}
