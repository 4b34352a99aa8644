use thiserror::Error;

/// Errors raised by the tracking core
///
/// Only configuration and setup can fail; per-frame problems degrade to
/// "no new information" instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoachError {
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("Invalid thresholds for {exercise}: low {low} must be below high {high}")]
    InvalidThresholds { exercise: String, low: f32, high: f32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type CoachResult<T> = Result<T, CoachError>;
