//! OpenAPI documentation and schema generation
//!
//! Defines the OpenAPI specification for the vidgrab-dl REST API using
//! utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the vidgrab-dl REST API
///
/// The spec can be accessed via:
/// - `/api/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation (if enabled)
#[derive(OpenApi)]
#[openapi(
    info(
        title = "vidgrab-dl REST API",
        version = "1.0.0",
        description = "REST API for submitting video download requests, browsing history, and managing preferences",
        contact(
            name = "vidgrab-dl",
            url = "https://github.com/vidgrab/vidgrab-dl"
        ),
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8640", description = "Local development server")
    ),
    paths(
        // Downloads
        crate::api::routes::submit_download,
        crate::api::routes::list_downloads,

        // Settings
        crate::api::routes::get_settings,
        crate::api::routes::update_settings,

        // System
        crate::api::routes::health_check,
        crate::api::routes::list_platforms,
        crate::api::routes::openapi_spec,
        crate::api::routes::event_stream,
    ),
    components(
        schemas(
            crate::api::routes::SubmitDownloadRequest,
            crate::api::routes::SubmitDownloadResponse,
            crate::types::DownloadId,
            crate::types::UserId,
            crate::types::Platform,
            crate::types::PlatformInfo,
            crate::types::Status,
            crate::types::DownloadInfo,
            crate::types::UserSettings,
            crate::types::SettingsPatch,
            crate::types::Event,
            crate::error::ApiError,
            crate::error::ErrorDetail,
        )
    ),
    tags(
        (name = "downloads", description = "Download submission and history"),
        (name = "settings", description = "Per-user preferences"),
        (name = "system", description = "Health, catalog and observability")
    )
)]
pub struct ApiDoc;
