/// Frame Classifier
///
/// Turns one pose frame into a raw phase, a form score and a feedback cue for a given
/// exercise rule. Stateless: the same rule and frame always give the same result.
///
/// Evaluation order:
/// - every landmark the rule reads must clear the confidence threshold
/// - an optional position trigger is checked first, then the two angle thresholds
/// - faults are tested in rule order; the first firing fault supplies the feedback

use crate::models::classification::{Classification, FrameAssessment};
use crate::models::exercise_rule::{
    AngleReduce, AngleSignal, ExerciseRule, FaultMetric, FaultPolicy, PhaseModel,
};
use crate::models::keypoint::{PoseFrame, PoseLandmark};
use crate::models::phase::ExercisePhase;
use crate::services::geometry::{joint_angle, resolve_point, vertical_drop};

const PERFECT_SCORE: u32 = 100;

/// Left and right primary angles for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleReading {
    pub left: f32,
    pub right: f32,
    pub value: f32,
}

impl AngleReading {
    pub fn asymmetry(&self) -> f32 {
        (self.left - self.right).abs()
    }
}

/// Frame classifier
#[derive(Debug, Clone)]
pub struct FrameClassifier {
    /// Minimum confidence for a landmark to be trusted
    min_confidence: f32,
}

impl FrameClassifier {
    /// Create a classifier with the default 0.5 confidence threshold
    pub fn new() -> Self {
        Self {
            min_confidence: 0.5,
        }
    }

    /// Set minimum confidence threshold
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence.clamp(0.0, 1.0);
        self
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Classify a single frame against an exercise rule
    pub fn classify(&self, rule: &ExerciseRule, frame: &PoseFrame) -> FrameAssessment {
        if let Some(missing) = frame.first_hidden(&rule.required_landmarks(), self.min_confidence) {
            return FrameAssessment::InsufficientData { missing };
        }

        let (phase, reading) = match rule.model {
            PhaseModel::Repetition {
                signal,
                thresholds,
                below_low,
                above_high,
                position,
            } => {
                // required landmarks are checked above, so this only trips on a rule that
                // reads a joint it does not declare
                let reading = match read_angles(signal, frame) {
                    Ok(reading) => reading,
                    Err(missing) => return FrameAssessment::InsufficientData { missing },
                };

                let position_phase = position.and_then(|trigger| {
                    let subject = resolve_point(frame, trigger.subject)?;
                    let reference = resolve_point(frame, trigger.reference)?;
                    (vertical_drop(&subject, &reference) > trigger.margin).then_some(trigger.phase)
                });

                let phase = match position_phase {
                    Some(phase) => phase,
                    None if reading.value < thresholds.low => below_low,
                    None if reading.value > thresholds.high => above_high,
                    None => ExercisePhase::Ready,
                };
                (phase, Some(reading))
            }
            PhaseModel::Isometric => (ExercisePhase::Hold, None),
        };

        let mut penalty = 0u32;
        let mut feedback = None;
        for fault in rule.faults {
            let Some(cue) = fault.cue_for(phase) else {
                continue;
            };
            let Some(measured) = measure(fault.metric, reading.as_ref(), frame) else {
                continue;
            };
            if measured <= fault.tolerance {
                continue;
            }

            penalty += u32::from(fault.penalty);
            if feedback.is_none() {
                feedback = Some(cue.to_string());
            }
            if rule.fault_policy == FaultPolicy::FirstOnly {
                break;
            }
        }

        if feedback.is_none() {
            feedback = match phase {
                ExercisePhase::Ready => Some(rule.ready_cue.to_string()),
                _ => rule.good_form_cue.map(str::to_string),
            };
        }

        let form_score = PERFECT_SCORE.saturating_sub(penalty) as u8;

        FrameAssessment::Classified(Classification {
            phase,
            form_score,
            feedback,
        })
    }
}

impl Default for FrameClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the primary angle pair for a rule's signal
///
/// Fails with the first landmark absent from the frame.
pub fn read_angles(signal: AngleSignal, frame: &PoseFrame) -> Result<AngleReading, PoseLandmark> {
    let point = |lm: PoseLandmark| frame.keypoint(lm).ok_or(lm);
    let side_angle = |[a, b, c]: [PoseLandmark; 3]| -> Result<f32, PoseLandmark> {
        Ok(joint_angle(point(a)?, point(b)?, point(c)?))
    };

    let left = side_angle(signal.joint.left())?;
    let right = side_angle(signal.joint.right())?;
    let value = match signal.reduce {
        AngleReduce::Mean => (left + right) / 2.0,
        AngleReduce::Min => left.min(right),
    };

    Ok(AngleReading { left, right, value })
}

fn measure(metric: FaultMetric, reading: Option<&AngleReading>, frame: &PoseFrame) -> Option<f32> {
    match metric {
        FaultMetric::Asymmetry => reading.map(AngleReading::asymmetry),
        FaultMetric::Gap(a, b) => {
            let a = resolve_point(frame, a)?;
            let b = resolve_point(frame, b)?;
            Some(vertical_drop(&a, &b).abs())
        }
        FaultMetric::Drop(a, b) => {
            let a = resolve_point(frame, a)?;
            let b = resolve_point(frame, b)?;
            Some(vertical_drop(&a, &b))
        }
    }
}
