use serde::{Deserialize, Serialize};

use crate::models::keypoint::PoseLandmark;
use crate::models::phase::ExercisePhase;

/// Feedback shown when a frame cannot be classified
pub const POSE_NOT_VISIBLE: &str = "pose not clearly visible";

/// Output of classifying one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub phase: ExercisePhase,
    /// 0-100
    pub form_score: u8,
    pub feedback: Option<String>,
}

/// Result of running a classifier on a frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameAssessment {
    Classified(Classification),
    /// A required landmark was missing or below the confidence threshold
    InsufficientData { missing: PoseLandmark },
}

impl FrameAssessment {
    pub fn classification(&self) -> Option<&Classification> {
        match self {
            FrameAssessment::Classified(c) => Some(c),
            FrameAssessment::InsufficientData { .. } => None,
        }
    }
}

/// Presentation tone for a form score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTone {
    Positive,
    Caution,
    Critical,
}

impl FeedbackTone {
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => FeedbackTone::Positive,
            70..=84 => FeedbackTone::Caution,
            _ => FeedbackTone::Critical,
        }
    }
}
