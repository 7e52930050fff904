//! Configuration types for vidgrab-dl

use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use utoipa::ToSchema;

/// Top-level configuration
///
/// Every field has a sensible default; `Config::default()` yields a working
/// instance backed by `./vidgrab.db` with the API on `127.0.0.1:8640`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Path to the SQLite database file (default: "./vidgrab.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// REST API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Processing behavior configuration
    #[serde(default)]
    pub processing: ProcessingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            api: ApiConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Bind address for the API server (default: 127.0.0.1:8640)
    #[serde(default = "default_bind_address")]
    #[schema(value_type = String)]
    pub bind_address: SocketAddr,

    /// Optional API key; when set, requests must carry a matching
    /// `X-Api-Key` header
    #[serde(default)]
    pub api_key: Option<String>,

    /// Enable CORS middleware (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins; "*" allows any origin (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Serve interactive Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            api_key: None,
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

/// Processing behavior configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcessingConfig {
    /// Simulated resolver latency in milliseconds (default: 2000)
    ///
    /// The shipped resolver fabricates metadata after this fixed delay; a
    /// real resolver integration ignores it.
    #[serde(default = "default_latency_ms")]
    pub simulated_latency_ms: u64,

    /// Maximum records returned by a history listing (default: 50)
    #[serde(default = "default_history_limit")]
    pub history_limit: i64,
}

impl ProcessingConfig {
    /// Simulated latency as a [`Duration`]
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_latency_ms(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./vidgrab.db")
}

fn default_bind_address() -> SocketAddr {
    // Safe: hardcoded literal always parses
    "127.0.0.1:8640".parse().unwrap_or_else(|_| {
        SocketAddr::from(([127, 0, 0, 1], 8640))
    })
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_latency_ms() -> u64 {
    2000
}

fn default_history_limit() -> i64 {
    50
}

fn default_true() -> bool {
    true
}
