use serde::{Deserialize, Serialize};

/// One exercise in the workout database.
///
/// Field names follow the on-disk JSON. Keys that are absent stay absent on
/// save, and keys this type doesn't know about are kept in `extra`, so a
/// load/save cycle reproduces the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub id: String,
    /// Kept as raw JSON: hand-edited databases carry strings here too.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_number: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Free-form video URL or bare id; may be empty.
    #[serde(
        rename = "video_search_url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub video_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ExerciseRecord {
    /// The exercise name, empty when the record has none.
    pub fn exercise_name(&self) -> &str {
        self.exercise_name.as_deref().unwrap_or_default()
    }

    /// The check number, only when it is stored as an integer.
    pub fn check_number(&self) -> Option<i64> {
        self.check_number.as_ref().and_then(serde_json::Value::as_i64)
    }
}

/// Partial update: every `Some` field overwrites the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordPatch {
    pub exercise_name: Option<String>,
    pub category: Option<String>,
    pub material_name: Option<String>,
    pub instructions: Option<String>,
    pub video_reference: Option<String>,
    pub thumbnail: Option<String>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.exercise_name.is_none()
            && self.category.is_none()
            && self.material_name.is_none()
            && self.instructions.is_none()
            && self.video_reference.is_none()
            && self.thumbnail.is_none()
    }

    pub fn apply(self, record: &mut ExerciseRecord) {
        if let Some(v) = self.exercise_name {
            record.exercise_name = Some(v);
        }
        if let Some(v) = self.category {
            record.category = Some(v);
        }
        if let Some(v) = self.material_name {
            record.material_name = Some(v);
        }
        if let Some(v) = self.instructions {
            record.instructions = Some(v);
        }
        if let Some(v) = self.video_reference {
            record.video_reference = Some(v);
        }
        if let Some(v) = self.thumbnail {
            record.thumbnail = Some(v);
        }
    }
}

/// Fields for a manually created record. Unset category and material fall
/// back to the database defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRecord {
    pub exercise_name: String,
    pub category: Option<String>,
    pub material_name: Option<String>,
    pub instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_roundtrip() {
        let json = r#"{
            "check_number": 12,
            "id": "ex_12",
            "exercise_name": "Push Up",
            "category": "Borst",
            "material_name": "Bodyweight",
            "material_description": "",
            "instructions": "Keep your core tight",
            "video_search_url": "https://youtu.be/abcdefghijk",
            "thumbnail": "",
            "difficulty": 3
        }"#;
        let record: ExerciseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.video_reference.as_deref(), Some("https://youtu.be/abcdefghijk"));
        assert_eq!(record.extra.get("difficulty"), Some(&serde_json::json!(3)));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["difficulty"], 3);
        assert_eq!(value["video_search_url"], "https://youtu.be/abcdefghijk");
        assert_eq!(value["check_number"], 12);
    }

    #[test]
    fn test_minimal_record() {
        let record: ExerciseRecord = serde_json::from_str(r#"{"id": "a"}"#).unwrap();
        assert_eq!(record.exercise_name(), "");
        assert!(record.video_reference.is_none());
        assert!(record.extra.is_empty());

        // Absent keys are not invented on the way out.
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, serde_json::json!({"id": "a"}));
    }

    #[test]
    fn test_non_integer_check_number() {
        let record: ExerciseRecord =
            serde_json::from_str(r#"{"id": "a", "check_number": "12"}"#).unwrap();
        assert_eq!(record.check_number(), None);
        assert_eq!(serde_json::to_value(&record).unwrap()["check_number"], "12");

        let record: ExerciseRecord =
            serde_json::from_str(r#"{"id": "b", "check_number": 4}"#).unwrap();
        assert_eq!(record.check_number(), Some(4));
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut record: ExerciseRecord =
            serde_json::from_str(r#"{"id": "a", "exercise_name": "Squat", "category": "Benen"}"#)
                .unwrap();
        let patch = RecordPatch {
            exercise_name: Some("Air Squat".into()),
            video_reference: Some("https://youtu.be/abcdefghijk".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply(&mut record);

        assert_eq!(record.exercise_name(), "Air Squat");
        assert_eq!(record.category.as_deref(), Some("Benen"));
        assert_eq!(record.material_name, None);
        assert_eq!(record.video_reference.as_deref(), Some("https://youtu.be/abcdefghijk"));
        assert!(RecordPatch::default().is_empty());
    }
}
