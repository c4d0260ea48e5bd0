//! Trait definition for the video search backend.
//!
//! The YouTube client implements [`VideoService`]; the matcher and the
//! lookup helpers are generic over it so tests can substitute a mock.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::youtube::YouTubeError;

/// A video returned by the service. Fetched per run, never persisted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCandidate {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
}

impl VideoCandidate {
    pub fn watch_url(&self) -> String {
        watch_url(&self.video_id)
    }

    pub fn embed_url(&self) -> String {
        embed_url(&self.video_id)
    }
}

/// Canonical `watch?v=` link for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Embeddable player link for a video id.
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}")
}

/// Raw calls against a video search service.
pub trait VideoService: Send + Sync {
    /// Look up videos by id in a single request. Ids the service doesn't
    /// know are simply missing from the result.
    fn list_videos(
        &self,
        ids: &[String],
    ) -> impl Future<Output = Result<Vec<VideoCandidate>, YouTubeError>> + Send;

    /// Full-text search, at most `limit` results, in service relevance order.
    fn search_videos(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<VideoCandidate>, YouTubeError>> + Send;
}
