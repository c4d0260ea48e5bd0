//! In-memory `VideoService` for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use vidmatch_api::{VideoCandidate, VideoService, YouTubeError};

use crate::models::ExerciseRecord;

#[derive(Default)]
pub struct MockService {
    videos: HashMap<String, VideoCandidate>,
    search_results: Vec<VideoCandidate>,
    failure: Option<YouTubeError>,
    pub list_calls: Mutex<Vec<Vec<String>>>,
    pub search_calls: Mutex<Vec<(String, u32)>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_video(mut self, id: &str, title: &str) -> Self {
        self.videos.insert(id.to_string(), candidate(id, title));
        self
    }

    pub fn with_candidate(mut self, candidate: VideoCandidate) -> Self {
        self.videos.insert(candidate.video_id.clone(), candidate);
        self
    }

    pub fn with_search_results(mut self, results: Vec<VideoCandidate>) -> Self {
        self.search_results = results;
        self
    }

    pub fn failing(mut self, err: YouTubeError) -> Self {
        self.failure = Some(err);
        self
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.lock().unwrap().len()
    }
}

impl VideoService for MockService {
    async fn list_videos(&self, ids: &[String]) -> Result<Vec<VideoCandidate>, YouTubeError> {
        self.list_calls.lock().unwrap().push(ids.to_vec());
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(ids.iter().filter_map(|id| self.videos.get(id).cloned()).collect())
    }

    async fn search_videos(&self, query: &str, limit: u32) -> Result<Vec<VideoCandidate>, YouTubeError> {
        self.search_calls.lock().unwrap().push((query.to_string(), limit));
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.search_results.iter().take(limit as usize).cloned().collect())
    }
}

pub fn candidate(id: &str, title: &str) -> VideoCandidate {
    VideoCandidate {
        video_id: id.to_string(),
        title: title.to_string(),
        description: format!("About {title}"),
        thumbnail_url: Some(format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg")),
    }
}

pub fn record(id: &str, name: &str, reference: Option<&str>) -> ExerciseRecord {
    ExerciseRecord {
        id: id.to_string(),
        check_number: None,
        exercise_name: Some(name.to_string()),
        category: Some("Hele Lichaam".to_string()),
        material_name: Some("Bodyweight".to_string()),
        material_description: None,
        instructions: None,
        video_reference: reference.map(str::to_string),
        thumbnail: None,
        extra: serde_json::Map::new(),
    }
}
