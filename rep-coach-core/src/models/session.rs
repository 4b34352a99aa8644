use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::classification::FeedbackTone;
use crate::models::exercise::ExerciseKind;
use crate::models::phase::ExercisePhase;

/// Commands accepted by a workout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionCommand {
    SelectExercise(String),
    ResetWorkout,
    CompleteSet,
}

/// Per-frame annotation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOverlay {
    pub timestamp_ms: u64,
    pub phase: ExercisePhase,
    pub rep_count: u32,
    pub form_score: u8,
    pub confidence: f32,
    pub feedback: Option<String>,
    /// This frame completed a counted repetition
    pub rep_completed: bool,
}

impl FrameOverlay {
    pub fn tone(&self) -> FeedbackTone {
        FeedbackTone::from_score(self.form_score)
    }
}

impl std::fmt::Display for FrameOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "State: {}", self.phase.to_string().to_uppercase())?;
        writeln!(f, "Reps: {}", self.rep_count)?;
        writeln!(f, "Score: {}%", self.form_score)?;
        write!(f, "Conf: {:.1}", self.confidence)
    }
}

/// Read-only view of a session for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub exercise: ExerciseKind,
    pub exercise_name: String,
    pub phase: ExercisePhase,
    pub state_confidence: f32,
    pub rep_count: u32,
    pub set_count: u32,
    pub total_rep_count: u32,
    /// Seconds
    pub average_rep_duration: f64,
    pub form_score: u8,
    pub feedback: Option<String>,
    pub frames_processed: u64,
}
