mod exercise;
mod video;

pub use exercise::{ExerciseRecord, NewRecord, RecordPatch};
pub use video::{MatchQuality, MatchResult};
