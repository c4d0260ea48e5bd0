use serde::{Deserialize, Serialize};
use vidmatch_api::traits::{embed_url, watch_url};
use vidmatch_api::VideoCandidate;

/// A candidate video paired with how well its title fits an exercise.
///
/// Serializes with the derived `watch_url`, `embed_url` and `quality`
/// alongside the stored fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "MatchOutput")]
pub struct MatchResult {
    /// The record this result belongs to; `None` for `resolve`/`discover`.
    #[serde(default)]
    pub record_id: Option<String>,
    pub video_id: Option<String>,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    /// Title similarity, 0–100.
    pub match_score: u8,
}

impl MatchResult {
    pub fn from_candidate(
        record_id: Option<String>,
        candidate: &VideoCandidate,
        match_score: u8,
    ) -> Self {
        Self {
            record_id,
            video_id: Some(candidate.video_id.clone()),
            title: candidate.title.clone(),
            description: candidate.description.clone(),
            thumbnail_url: candidate.thumbnail_url.clone(),
            match_score,
        }
    }

    pub fn quality(&self) -> MatchQuality {
        MatchQuality::from_score(self.match_score)
    }

    pub fn watch_url(&self) -> Option<String> {
        self.video_id.as_deref().map(watch_url)
    }

    pub fn embed_url(&self) -> Option<String> {
        self.video_id.as_deref().map(embed_url)
    }
}

#[derive(Serialize)]
struct MatchOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    record_id: Option<String>,
    video_id: Option<String>,
    title: String,
    description: String,
    thumbnail_url: Option<String>,
    match_score: u8,
    quality: MatchQuality,
    watch_url: Option<String>,
    embed_url: Option<String>,
}

impl From<MatchResult> for MatchOutput {
    fn from(result: MatchResult) -> Self {
        let quality = result.quality();
        let watch_url = result.watch_url();
        let embed_url = result.embed_url();
        Self {
            record_id: result.record_id,
            video_id: result.video_id,
            title: result.title,
            description: result.description,
            thumbnail_url: result.thumbnail_url,
            match_score: result.match_score,
            quality,
            watch_url,
            embed_url,
        }
    }
}

/// Coarse banding of a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchQuality {
    Poor,
    Fair,
    Good,
}

impl MatchQuality {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=39 => Self::Poor,
            40..=79 => Self::Fair,
            _ => Self::Good,
        }
    }
}

impl std::fmt::Display for MatchQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Poor => write!(f, "poor"),
            Self::Fair => write!(f, "fair"),
            Self::Good => write!(f, "good"),
        }
    }
}
