//! Batched lookups and qualified search on top of a [`VideoService`].

use std::collections::{HashMap, HashSet};

use crate::traits::{VideoCandidate, VideoService};
use crate::youtube::YouTubeError;

/// Hard limit of ids per `videos.list` request.
pub const MAX_IDS_PER_BATCH: usize = 50;

/// Only this many batches are fetched per run; ids beyond
/// `MAX_BATCHES * MAX_IDS_PER_BATCH` are dropped with a warning.
pub const MAX_BATCHES: usize = 1;

/// Appended to every discovery query to bias results toward short clips.
pub const SEARCH_QUALIFIER: &str = "shorts";

pub const DEFAULT_SEARCH_LIMIT: u32 = 5;

/// Largest `maxResults` that `search.list` accepts.
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// Fetch details for `ids`, keyed by video id.
///
/// Duplicates are collapsed in encounter order before batching. A batch
/// that fails for a transient reason is logged and contributes nothing;
/// failures that need operator action abort the whole fetch.
pub async fn fetch_by_ids<S: VideoService>(
    service: &S,
    ids: &[String],
) -> Result<HashMap<String, VideoCandidate>, YouTubeError> {
    let mut details = HashMap::new();
    if ids.is_empty() {
        return Ok(details);
    }

    let mut seen: HashSet<&String> = HashSet::new();
    let distinct: Vec<String> = ids
        .iter()
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect();

    let cap = MAX_BATCHES * MAX_IDS_PER_BATCH;
    if distinct.len() > cap {
        tracing::warn!(
            requested = distinct.len(),
            fetched = cap,
            "Batch cap reached, remaining ids are not looked up"
        );
    }

    for (index, batch) in distinct.chunks(MAX_IDS_PER_BATCH).take(MAX_BATCHES).enumerate() {
        match service.list_videos(batch).await {
            Ok(items) => {
                tracing::debug!(batch = index, requested = batch.len(), found = items.len(), "Batch fetched");
                for item in items {
                    details.insert(item.video_id.clone(), item);
                }
            }
            Err(e) if e.requires_operator() => return Err(e),
            Err(e) => {
                tracing::warn!(batch = index, error = %e, "Batch fetch failed, continuing");
            }
        }
    }

    Ok(details)
}

/// Search for `query` with the [`SEARCH_QUALIFIER`] appended, keeping the
/// service's relevance order. `limit` is clamped to `1..=MAX_SEARCH_LIMIT`.
pub async fn search_by_query<S: VideoService>(
    service: &S,
    query: &str,
    limit: u32,
) -> Result<Vec<VideoCandidate>, YouTubeError> {
    let qualified = format!("{} {SEARCH_QUALIFIER}", query.trim());
    service
        .search_videos(&qualified, limit.clamp(1, MAX_SEARCH_LIMIT))
        .await
}
