use serde::{Deserialize, Serialize};

/// Discrete exercise state
///
/// Meaning is exercise-specific: `Down` is "arms bent" for a push-up but
/// "thighs parallel" for a squat. Isometric exercises only report `Hold`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExercisePhase {
    #[default]
    Ready,
    Down,
    Up,
    Hold,
}

impl ExercisePhase {
    /// Up and down are the moving phases of a repetition
    pub fn is_active(self) -> bool {
        matches!(self, ExercisePhase::Up | ExercisePhase::Down)
    }

    /// Frames a raw label must be seen in a row before it can be committed
    pub fn frames_to_commit(self) -> u32 {
        if self.is_active() {
            1
        } else {
            2
        }
    }
}

impl std::fmt::Display for ExercisePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExercisePhase::Ready => write!(f, "ready"),
            ExercisePhase::Down => write!(f, "down"),
            ExercisePhase::Up => write!(f, "up"),
            ExercisePhase::Hold => write!(f, "hold"),
        }
    }
}

/// A committed change of phase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: ExercisePhase,
    pub to: ExercisePhase,
}

impl PhaseTransition {
    /// A committed down to up change is a repetition candidate
    pub fn completes_rep(&self) -> bool {
        self.from == ExercisePhase::Down && self.to == ExercisePhase::Up
    }
}
