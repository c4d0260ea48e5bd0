use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::models::{ExerciseRecord, NewRecord, RecordPatch};

const DEFAULT_CATEGORY: &str = "Hele Lichaam";
const DEFAULT_MATERIAL: &str = "Bodyweight";

/// JSON-file-backed exercise database.
///
/// The file holds one array of records. Every mutation reads the full
/// snapshot, changes it and writes it back; the last writer wins.
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ── Snapshot I/O ────────────────────────────────────────────

    /// Read every record. A missing file is an empty database.
    pub fn load(&self) -> Result<Vec<ExerciseRecord>, CoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Database file missing, starting empty");
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Replace the file with `records`, pretty-printed with 2-space indent.
    pub fn save(&self, records: &[ExerciseRecord]) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut ser)?;
        buf.push(b'\n');

        std::fs::write(&self.path, buf)?;
        debug!(path = %self.path.display(), count = records.len(), "Database saved");
        Ok(())
    }

    // ── Record CRUD ─────────────────────────────────────────────

    pub fn list(&self) -> Result<Vec<ExerciseRecord>, CoreError> {
        self.load()
    }

    pub fn get(&self, id: &str) -> Result<ExerciseRecord, CoreError> {
        self.load()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::RecordNotFound(id.to_string()))
    }

    /// Apply `patch` to the record with `id` and return the updated record.
    pub fn update(&self, id: &str, patch: RecordPatch) -> Result<ExerciseRecord, CoreError> {
        let mut records = self.load()?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::RecordNotFound(id.to_string()))?;

        patch.apply(record);
        let updated = record.clone();

        self.save(&records)?;
        info!(id, "Record updated");
        Ok(updated)
    }

    /// Append a new record with a generated `manual_<millis>` id and the
    /// next free check number. Check numbers that aren't integers are
    /// ignored when picking it.
    pub fn create(&self, new: NewRecord) -> Result<ExerciseRecord, CoreError> {
        let name = new.exercise_name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("exercise name is required".into()));
        }

        let mut records = self.load()?;
        let next_check = records
            .iter()
            .filter_map(ExerciseRecord::check_number)
            .max()
            .unwrap_or(0)
            + 1;

        let mut id = format!("manual_{}", Utc::now().timestamp_millis());
        while records.iter().any(|r| r.id == id) {
            id.push('_');
        }

        let record = ExerciseRecord {
            id,
            check_number: Some(next_check.into()),
            exercise_name: Some(name.to_string()),
            category: Some(new.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string())),
            material_name: Some(new.material_name.unwrap_or_else(|| DEFAULT_MATERIAL.to_string())),
            material_description: Some(String::new()),
            instructions: Some(new.instructions.unwrap_or_default()),
            video_reference: Some(String::new()),
            thumbnail: Some(String::new()),
            extra: serde_json::Map::new(),
        };

        records.push(record.clone());
        self.save(&records)?;
        info!(id = %record.id, name = %record.exercise_name(), "Record created");
        Ok(record)
    }

    pub fn delete(&self, id: &str) -> Result<(), CoreError> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);

        if records.len() == before {
            return Err(CoreError::RecordNotFound(id.to_string()));
        }

        self.save(&records)?;
        info!(id, "Record deleted");
        Ok(())
    }
}
