use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, info};
use vidmatch_api::VideoService;

use crate::error::CoreError;
use crate::matcher;
use crate::models::{ExerciseRecord, MatchResult, RecordPatch};
use crate::storage::RecordStore;

/// Outcome of a reconciliation run over the record store.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    /// Match per record id, for every record whose video resolved.
    pub results: BTreeMap<String, MatchResult>,
    /// Selected records that could not be matched.
    pub unmatched: Vec<String>,
    /// Records rewritten with their canonical video link.
    pub updated: usize,
}

/// Analyze the stored records and, when `apply_min_score` is set, write
/// every match scoring at least that much back to the store.
///
/// Writing back normalizes `video_reference` to the canonical watch URL
/// and stores the video thumbnail. The store is saved once, and only if
/// something changed.
pub async fn reconcile<S: VideoService>(
    store: &RecordStore,
    service: &S,
    filter_ids: Option<&HashSet<String>>,
    apply_min_score: Option<u8>,
) -> Result<ReconcileReport, CoreError> {
    let mut records = store.load()?;
    let results = matcher::analyze(service, &records, filter_ids).await?;

    let filter = filter_ids.filter(|ids| !ids.is_empty());
    let unmatched: Vec<String> = records
        .iter()
        .filter(|r| filter.map_or(true, |ids| ids.contains(&r.id)))
        .filter(|r| !results.contains_key(&r.id))
        .map(|r| r.id.clone())
        .collect();

    let mut updated = 0;
    if let Some(min_score) = apply_min_score {
        for record in records.iter_mut() {
            let Some(result) = results.get(&record.id) else {
                continue;
            };
            if result.match_score < min_score {
                debug!(record = %record.id, score = result.match_score, "Below threshold, not applied");
                continue;
            }
            if video_patch(result).map_or(false, |patch| apply_if_changed(record, patch)) {
                updated += 1;
            }
        }

        if updated > 0 {
            store.save(&records)?;
        }
        info!(updated, min_score, "Reconciliation applied");
    }

    Ok(ReconcileReport {
        results,
        unmatched,
        updated,
    })
}

/// Store a resolved video on one record.
pub fn attach_video(
    store: &RecordStore,
    record_id: &str,
    result: &MatchResult,
) -> Result<ExerciseRecord, CoreError> {
    let patch = video_patch(result).ok_or_else(|| {
        CoreError::Validation(format!("match for {record_id} carries no video id"))
    })?;
    store.update(record_id, patch)
}

fn video_patch(result: &MatchResult) -> Option<RecordPatch> {
    let url = result.watch_url()?;
    Some(RecordPatch {
        video_reference: Some(url),
        thumbnail: result.thumbnail_url.clone(),
        ..Default::default()
    })
}

fn apply_if_changed(record: &mut ExerciseRecord, patch: RecordPatch) -> bool {
    let before = record.clone();
    patch.apply(record);
    *record != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{record, MockService};
    use tempfile::TempDir;

    fn seeded_store(records: &[ExerciseRecord]) -> (TempDir, RecordStore) {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path().join("workoutdatabase.json"));
        store.save(records).unwrap();
        (dir, store)
    }

    fn service() -> MockService {
        MockService::new()
            .with_video("aaaaaaaaaaa", "Air Squat")
            .with_video("bbbbbbbbbbb", "Completely unrelated vlog")
    }

    fn records() -> Vec<ExerciseRecord> {
        vec![
            record("sq", "Air Squat", Some("https://youtu.be/aaaaaaaaaaa")),
            record("lg", "Lunge", Some("bbbbbbbbbbb")),
            record("pl", "Plank", Some("")),
        ]
    }

    #[tokio::test]
    async fn test_report_without_apply() {
        let (_dir, store) = seeded_store(&records());
        let report = reconcile(&store, &service(), None, None).await.unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results["sq"].match_score, 100);
        assert_eq!(report.unmatched, vec!["pl"]);
        assert_eq!(report.updated, 0);

        // Nothing written back.
        let stored = store.get("sq").unwrap();
        assert_eq!(stored.video_reference.as_deref(), Some("https://youtu.be/aaaaaaaaaaa"));
    }

    #[tokio::test]
    async fn test_apply_respects_threshold() {
        let (_dir, store) = seeded_store(&records());
        let report = reconcile(&store, &service(), None, Some(80)).await.unwrap();

        assert_eq!(report.updated, 1);
        let squat = store.get("sq").unwrap();
        assert_eq!(
            squat.video_reference.as_deref(),
            Some("https://www.youtube.com/watch?v=aaaaaaaaaaa")
        );
        assert_eq!(
            squat.thumbnail.as_deref(),
            Some("https://i.ytimg.com/vi/aaaaaaaaaaa/hqdefault.jpg")
        );

        let lunge = store.get("lg").unwrap();
        assert_eq!(lunge.video_reference.as_deref(), Some("bbbbbbbbbbb"));
    }

    #[tokio::test]
    async fn test_apply_is_idempotent() {
        let (_dir, store) = seeded_store(&records());
        reconcile(&store, &service(), None, Some(0)).await.unwrap();
        let second = reconcile(&store, &service(), None, Some(0)).await.unwrap();
        assert_eq!(second.updated, 0);
    }

    #[tokio::test]
    async fn test_filtered_unmatched() {
        let (_dir, store) = seeded_store(&records());
        let filter: HashSet<String> = ["lg".to_string(), "pl".to_string()].into_iter().collect();
        let report = reconcile(&store, &service(), Some(&filter), None).await.unwrap();

        assert_eq!(report.results.keys().collect::<Vec<_>>(), vec!["lg"]);
        assert_eq!(report.unmatched, vec!["pl"]);
    }

    #[test]
    fn test_attach_video() {
        let (_dir, store) = seeded_store(&records());
        let result = MatchResult {
            record_id: None,
            video_id: Some("ccccccccccc".into()),
            title: "Plank Hold".into(),
            description: String::new(),
            thumbnail_url: Some("https://i.ytimg.com/vi/ccccccccccc/hqdefault.jpg".into()),
            match_score: 0,
        };

        let updated = attach_video(&store, "pl", &result).unwrap();
        assert_eq!(
            updated.video_reference.as_deref(),
            Some("https://www.youtube.com/watch?v=ccccccccccc")
        );
        assert_eq!(store.get("pl").unwrap(), updated);
    }

    #[test]
    fn test_attach_without_video_id() {
        let (_dir, store) = seeded_store(&records());
        let result = MatchResult {
            record_id: None,
            video_id: None,
            title: String::new(),
            description: String::new(),
            thumbnail_url: None,
            match_score: 0,
        };
        assert!(matches!(
            attach_video(&store, "pl", &result),
            Err(CoreError::Validation(_))
        ));
    }
}
