//! Resolve exercise records to demonstration videos.
//!
//! Three entry points, one per kind of match run:
//! - [`analyze`]: batch over many records, failures become omissions.
//! - [`resolve`]: one reference, failures are typed.
//! - [`discover`]: free-text search, results scored against an exercise.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};
use vidmatch_api::lookup;
use vidmatch_api::{VideoService, YouTubeError};

use crate::error::MatchError;
use crate::extract::extract_id;
use crate::models::{ExerciseRecord, MatchResult};
use crate::similarity::score_percent;

pub use vidmatch_api::lookup::DEFAULT_SEARCH_LIMIT;

/// Match every selected record against the video its reference points to.
///
/// `filter_ids` restricts the run to those record ids; `None` or an empty
/// set selects every record. Records sharing a video are served from one
/// lookup. A record is absent from the result when its reference has no
/// recognizable id or the video could not be fetched; a present entry with
/// `match_score == 0` means the video was found but the title shares
/// nothing with the exercise name.
pub async fn analyze<S: VideoService>(
    service: &S,
    records: &[ExerciseRecord],
    filter_ids: Option<&HashSet<String>>,
) -> Result<BTreeMap<String, MatchResult>, MatchError> {
    let filter = filter_ids.filter(|ids| !ids.is_empty());
    let selected: Vec<&ExerciseRecord> = records
        .iter()
        .filter(|r| filter.map_or(true, |ids| ids.contains(&r.id)))
        .collect();

    // Video id → indices into `selected`, in first-seen order.
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, record) in selected.iter().enumerate() {
        match extract_id(record.video_reference.as_deref()) {
            Some(video_id) => {
                groups
                    .entry(video_id.clone())
                    .or_insert_with(|| {
                        order.push(video_id);
                        Vec::new()
                    })
                    .push(idx);
            }
            None => debug!(record = %record.id, "No video id in reference, skipping"),
        }
    }

    debug!(
        records = selected.len(),
        videos = order.len(),
        "Analyzing video references"
    );

    let details = lookup::fetch_by_ids(service, &order).await?;

    let mut results = BTreeMap::new();
    for video_id in &order {
        let Some(candidate) = details.get(video_id) else {
            continue;
        };
        for &idx in &groups[video_id] {
            let record = selected[idx];
            let score = score_percent(record.exercise_name(), &candidate.title);
            results.insert(
                record.id.clone(),
                MatchResult::from_candidate(Some(record.id.clone()), candidate, score),
            );
        }
    }

    let missing = order.len() - order.iter().filter(|v| details.contains_key(*v)).count();
    if missing > 0 {
        warn!(missing, "Some referenced videos could not be fetched");
    }

    Ok(results)
}

/// Look up the single video behind `reference`.
///
/// Distinguishes a reference with no recognizable id
/// ([`MatchError::MalformedReference`]) from an id the service doesn't
/// know ([`YouTubeError::NotFound`]).
pub async fn resolve<S: VideoService>(
    service: &S,
    reference: &str,
) -> Result<MatchResult, MatchError> {
    let video_id = extract_id(Some(reference))
        .ok_or_else(|| MatchError::MalformedReference(reference.trim().to_string()))?;

    let items = service.list_videos(std::slice::from_ref(&video_id)).await?;
    let candidate = items
        .into_iter()
        .find(|c| c.video_id == video_id)
        .ok_or_else(|| YouTubeError::NotFound(video_id.clone()))?;

    debug!(video_id = %candidate.video_id, title = %candidate.title, "Resolved video");
    Ok(MatchResult::from_candidate(None, &candidate, 0))
}

/// Search the service for `query` and score each hit's title against
/// `exercise_name` (0 when no name is given). Service order is kept.
pub async fn discover<S: VideoService>(
    service: &S,
    query: &str,
    exercise_name: Option<&str>,
    limit: u32,
) -> Result<Vec<MatchResult>, MatchError> {
    if query.trim().is_empty() {
        return Err(MatchError::EmptyQuery);
    }

    let candidates = lookup::search_by_query(service, query, limit).await?;
    let name = exercise_name.map(str::trim).filter(|n| !n.is_empty());

    Ok(candidates
        .iter()
        .map(|c| {
            let score = name.map_or(0, |n| score_percent(n, &c.title));
            MatchResult::from_candidate(None, c, score)
        })
        .collect())
}
