//! Media resolution behind a capability trait
//!
//! The lifecycle state machine never talks to a platform directly; it hands
//! a [`ResolveRequest`] to a [`MediaResolver`] and stores whatever comes
//! back. The shipped [`SimulatedResolver`] fabricates metadata after a fixed
//! delay, so a real provider integration can slot in without touching the
//! state machine.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

use crate::Result;
use crate::types::Platform;

/// What the lifecycle manager asks a resolver to do
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// Source URL as submitted
    pub source_url: String,
    /// Platform derived from the URL
    pub platform: Platform,
    /// Requested container format
    pub format: String,
    /// Requested quality label
    pub quality: Option<String>,
}

/// Metadata produced by a resolver
#[derive(Debug, Clone)]
pub struct MediaInfo {
    /// Display title
    pub title: String,
    /// Thumbnail reference
    pub thumbnail_url: String,
    /// Artifact URL, if the resolver produced a fetchable artifact
    pub result_url: Option<String>,
    /// Size in bytes
    pub file_size_bytes: i64,
    /// Duration label ("M:SS")
    pub duration_label: String,
}

/// Capability interface for turning a download request into result metadata
///
/// Implementations must be safe to share across tasks; the manager holds one
/// behind an `Arc<dyn MediaResolver>`.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Resolve a request into media metadata
    ///
    /// Any error here collapses the download into the failed state.
    async fn resolve(&self, request: &ResolveRequest) -> Result<MediaInfo>;
}

/// Resolver that fabricates plausible metadata instead of fetching anything
///
/// Sleeps for a fixed latency, then synthesizes a per-platform title, a
/// pseudo-random thumbnail reference, a size in [1 MB, 51 MB) and a duration
/// label. It never produces a `result_url`; there is no artifact to fetch.
pub struct SimulatedResolver {
    latency: Duration,
}

impl SimulatedResolver {
    /// Create a simulated resolver with the given artificial latency
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    fn title_for(platform: Platform) -> &'static str {
        match platform {
            Platform::Youtube => "Amazing YouTube Video",
            Platform::Tiktok => "Viral TikTok Dance",
            Platform::Instagram => "Instagram Reel",
            Platform::Facebook => "Facebook Video Post",
        }
    }
}

#[async_trait]
impl MediaResolver for SimulatedResolver {
    async fn resolve(&self, request: &ResolveRequest) -> Result<MediaInfo> {
        tokio::time::sleep(self.latency).await;

        // rng is created after the suspension point and never held across one
        let mut rng = rand::thread_rng();
        let thumbnail_seed: u32 = rng.gen_range(0..1000);
        let file_size_bytes: i64 = rng.gen_range(1_000_000..51_000_000);
        let minutes: u32 = rng.gen_range(1..=10);
        let seconds: u32 = rng.gen_range(0..60);

        tracing::debug!(
            url = %request.source_url,
            platform = request.platform.as_str(),
            format = %request.format,
            "Synthesized media metadata"
        );

        Ok(MediaInfo {
            title: Self::title_for(request.platform).to_string(),
            thumbnail_url: format!("https://picsum.photos/320/180?random={}", thumbnail_seed),
            result_url: None,
            file_size_bytes,
            duration_label: format!("{}:{:02}", minutes, seconds),
        })
    }
}
