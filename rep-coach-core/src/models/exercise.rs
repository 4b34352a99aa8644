use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoachError;
use crate::models::exercise_rule::ExerciseRule;

/// Grouping used by exercise selection menus
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExerciseCategory {
    Calisthenics,
    Dumbbell,
    Barbell,
    Bar,
    Core,
}

impl std::fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExerciseCategory::Calisthenics => write!(f, "Calisthenics"),
            ExerciseCategory::Dumbbell => write!(f, "Dumbbell"),
            ExerciseCategory::Barbell => write!(f, "Barbell"),
            ExerciseCategory::Bar => write!(f, "Bar"),
            ExerciseCategory::Core => write!(f, "Core"),
        }
    }
}

/// Exercises the tracker has rules for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Pushup,
    Squat,
    Curl,
    Plank,
    Pullup,
    Lunge,
    Press,
    Row,
    GobletSquat,
    LateralRaise,
    TricepExtension,
    FrontRaise,
    Deadlift,
    OverheadSquat,
}

impl ExerciseKind {
    pub fn all() -> [Self; 14] {
        [
            Self::Pushup,
            Self::Squat,
            Self::Curl,
            Self::Plank,
            Self::Pullup,
            Self::Lunge,
            Self::Press,
            Self::Row,
            Self::GobletSquat,
            Self::LateralRaise,
            Self::TricepExtension,
            Self::FrontRaise,
            Self::Deadlift,
            Self::OverheadSquat,
        ]
    }

    /// Stable identifier used in configuration and commands
    pub fn id(&self) -> &'static str {
        match self {
            Self::Pushup => "pushup",
            Self::Squat => "squat",
            Self::Curl => "curl",
            Self::Plank => "plank",
            Self::Pullup => "pullup",
            Self::Lunge => "lunge",
            Self::Press => "press",
            Self::Row => "row",
            Self::GobletSquat => "goblet_squat",
            Self::LateralRaise => "lateral_raise",
            Self::TricepExtension => "tricep_extension",
            Self::FrontRaise => "front_raise",
            Self::Deadlift => "deadlift",
            Self::OverheadSquat => "overhead_squat",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pushup => "Push-ups",
            Self::Squat => "Squats",
            Self::Curl => "Bicep Curls",
            Self::Plank => "Plank Hold",
            Self::Pullup => "Pull-ups",
            Self::Lunge => "Lunges",
            Self::Press => "Shoulder Press",
            Self::Row => "Rows",
            Self::GobletSquat => "Goblet Squats",
            Self::LateralRaise => "Lateral Raises",
            Self::TricepExtension => "Tricep Extensions",
            Self::FrontRaise => "Front Raises",
            Self::Deadlift => "Deadlifts",
            Self::OverheadSquat => "Overhead Squats",
        }
    }

    pub fn category(&self) -> ExerciseCategory {
        match self {
            Self::Pushup | Self::Squat | Self::Lunge => ExerciseCategory::Calisthenics,
            Self::Curl
            | Self::Press
            | Self::Row
            | Self::GobletSquat
            | Self::LateralRaise
            | Self::TricepExtension
            | Self::FrontRaise => ExerciseCategory::Dumbbell,
            Self::Deadlift | Self::OverheadSquat => ExerciseCategory::Barbell,
            Self::Pullup => ExerciseCategory::Bar,
            Self::Plank => ExerciseCategory::Core,
        }
    }

    /// One-line coaching tip
    pub fn tip(&self) -> &'static str {
        match self {
            Self::Pushup => "Keep your back straight, lower until arms are at 90 degrees",
            Self::Squat => "Keep knees aligned, lower until thighs are parallel to ground",
            Self::Curl => "Maintain even motion, full range of movement",
            Self::Plank => "Keep back straight and hips level",
            Self::Pullup => "Pull until chin is over the bar, maintain even arm movement",
            Self::Lunge => "Keep hips level, lower until back knee nearly touches ground",
            Self::Press => "Press weights straight overhead with even arm movement",
            Self::Row => "Maintain straight back while pulling weights toward chest",
            Self::GobletSquat => "Hold dumbbell close to chest, squat until thighs are parallel",
            Self::LateralRaise => "Raise arms to shoulder level, keep slight bend in elbows",
            Self::TricepExtension => "Extend arms fully behind head, keep elbows close",
            Self::FrontRaise => "Raise arms to shoulder level, control the movement",
            Self::Deadlift => "Hinge at hips, keep back straight, stand tall",
            Self::OverheadSquat => "Keep arms overhead, squat until thighs are parallel",
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ExerciseKind {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .into_iter()
            .find(|kind| kind.id() == wanted)
            .ok_or_else(|| CoachError::UnknownExercise(s.to_string()))
    }
}

/// A catalogue entry: identity, presentation, and the rule that classifies frames
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDefinition {
    pub kind: ExerciseKind,
    pub name: &'static str,
    pub category: ExerciseCategory,
    pub rule: ExerciseRule,
}

impl ExerciseDefinition {
    pub fn new(kind: ExerciseKind) -> Self {
        Self {
            kind,
            name: kind.display_name(),
            category: kind.category(),
            rule: ExerciseRule::for_exercise(kind),
        }
    }

    pub fn id(&self) -> &'static str {
        self.kind.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_ids_round_trip_through_from_str() {
        for kind in ExerciseKind::all() {
            assert_eq!(kind.id().parse::<ExerciseKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Goblet_Squat".parse::<ExerciseKind>().unwrap(), ExerciseKind::GobletSquat);
    }

    #[test]
    fn test_unknown_exercise_is_an_error() {
        assert_matches!(
            "burpee".parse::<ExerciseKind>(),
            Err(CoachError::UnknownExercise(id)) if id == "burpee"
        );
    }

    #[test]
    fn test_serde_uses_ids() {
        assert_eq!(
            serde_json::to_string(&ExerciseKind::TricepExtension).unwrap(),
            "\"tricep_extension\""
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(ExerciseKind::Plank.category(), ExerciseCategory::Core);
        assert_eq!(ExerciseKind::Pullup.category(), ExerciseCategory::Bar);
        assert_eq!(ExerciseKind::Row.category(), ExerciseCategory::Dumbbell);
        assert_eq!(ExerciseKind::Lunge.category(), ExerciseCategory::Calisthenics);
    }
}
