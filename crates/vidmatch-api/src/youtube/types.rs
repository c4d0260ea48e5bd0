use serde::Deserialize;

use crate::traits::VideoCandidate;

// ── videos.list ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub snippet: Snippet,
}

impl From<VideoItem> for VideoCandidate {
    fn from(item: VideoItem) -> Self {
        item.snippet.into_candidate(item.id)
    }
}

// ── search.list ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
    pub snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    pub video_id: Option<String>,
}

impl SearchItem {
    /// Searches are restricted to `type=video`, but channel or playlist hits
    /// carry no `videoId` and are skipped.
    pub fn into_candidate(self) -> Option<VideoCandidate> {
        let video_id = self.id.video_id?;
        Some(self.snippet.into_candidate(video_id))
    }
}

// ── Shared snippet ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct Snippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

impl Snippet {
    fn into_candidate(self, video_id: String) -> VideoCandidate {
        let thumbnail_url = self.thumbnails.best().map(str::to_string);
        VideoCandidate {
            video_id,
            title: self.title,
            description: self.description,
            thumbnail_url,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub default: Option<Thumbnail>,
}

impl Thumbnails {
    /// Highest available resolution: high, then medium, then default.
    pub fn best(&self) -> Option<&str> {
        self.high
            .as_ref()
            .or(self.medium.as_ref())
            .or(self.default.as_ref())
            .map(|t| t.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
}

// ── Error envelope ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiErrorReason>,
    #[serde(default)]
    pub details: Vec<ApiErrorReason>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorReason {
    pub reason: Option<String>,
}

impl ApiErrorBody {
    /// All machine-readable reasons from both the legacy `errors` list and
    /// the `details` list.
    pub fn reasons(&self) -> Vec<String> {
        self.errors
            .iter()
            .chain(self.details.iter())
            .filter_map(|e| e.reason.clone())
            .collect()
    }
}
