/// Exercise rule table
///
/// Every exercise is described as data: which joint angle drives its phases, the two
/// angle thresholds, an optional vertical position trigger, and an ordered list of form
/// faults. A single evaluator in `services::frame_classifier` interprets these rules.

use crate::models::exercise::ExerciseKind;
use crate::models::keypoint::PoseLandmark;
use crate::models::phase::ExercisePhase;

use PoseLandmark::*;

/// Joint whose left/right angles form the primary signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleJoint {
    /// shoulder - elbow - wrist
    Elbow,
    /// hip - knee - ankle
    Knee,
    /// hip - shoulder - elbow
    Shoulder,
    /// shoulder - hip - knee
    Hip,
}

impl AngleJoint {
    /// (outer, vertex, outer) landmarks on the left side
    pub fn left(self) -> [PoseLandmark; 3] {
        match self {
            AngleJoint::Elbow => [LeftShoulder, LeftElbow, LeftWrist],
            AngleJoint::Knee => [LeftHip, LeftKnee, LeftAnkle],
            AngleJoint::Shoulder => [LeftHip, LeftShoulder, LeftElbow],
            AngleJoint::Hip => [LeftShoulder, LeftHip, LeftKnee],
        }
    }

    /// (outer, vertex, outer) landmarks on the right side
    pub fn right(self) -> [PoseLandmark; 3] {
        match self {
            AngleJoint::Elbow => [RightShoulder, RightElbow, RightWrist],
            AngleJoint::Knee => [RightHip, RightKnee, RightAnkle],
            AngleJoint::Shoulder => [RightHip, RightShoulder, RightElbow],
            AngleJoint::Hip => [RightShoulder, RightHip, RightKnee],
        }
    }
}

/// How the left and right angles combine into one value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleReduce {
    Mean,
    /// Lunges: the working leg is whichever bends further
    Min,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleSignal {
    pub joint: AngleJoint,
    pub reduce: AngleReduce,
}

/// A landmark or the midpoint of a landmark pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPoint {
    Joint(PoseLandmark),
    Midpoint(PoseLandmark, PoseLandmark),
}

impl BodyPoint {
    pub const SHOULDERS: BodyPoint = BodyPoint::Midpoint(LeftShoulder, RightShoulder);
    pub const HIPS: BodyPoint = BodyPoint::Midpoint(LeftHip, RightHip);
    pub const KNEES: BodyPoint = BodyPoint::Midpoint(LeftKnee, RightKnee);
    pub const WRISTS: BodyPoint = BodyPoint::Midpoint(LeftWrist, RightWrist);

    pub fn landmarks(&self) -> Vec<PoseLandmark> {
        match *self {
            BodyPoint::Joint(lm) => vec![lm],
            BodyPoint::Midpoint(a, b) => vec![a, b],
        }
    }
}

/// Angle thresholds separating the three rep phases
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleThresholds {
    /// Angles strictly below this map to `below_low`
    pub low: f32,
    /// Angles strictly above this map to `above_high`
    pub high: f32,
}

/// Declares a phase when `subject` sits lower in the image than `reference` by more
/// than `margin` (image y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionTrigger {
    pub phase: ExercisePhase,
    pub subject: BodyPoint,
    pub reference: BodyPoint,
    pub margin: f32,
}

/// Measurement a fault is tested against
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaultMetric {
    /// Absolute difference between left and right primary angles, degrees
    Asymmetry,
    /// Absolute vertical distance between two points
    Gap(BodyPoint, BodyPoint),
    /// How far the first point sits below the second (negative when above)
    Drop(BodyPoint, BodyPoint),
}

/// A form fault: fires when its metric exceeds `tolerance` and it has a cue for the
/// current phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultRule {
    pub metric: FaultMetric,
    pub tolerance: f32,
    pub penalty: u8,
    pub cues: &'static [(ExercisePhase, &'static str)],
}

impl FaultRule {
    pub fn cue_for(&self, phase: ExercisePhase) -> Option<&'static str> {
        self.cues
            .iter()
            .find(|(p, _)| *p == phase)
            .map(|(_, cue)| *cue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Every firing fault deducts its penalty
    Stack,
    /// Only the first firing fault counts
    FirstOnly,
}

/// How an exercise turns a frame into a phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseModel {
    Repetition {
        signal: AngleSignal,
        thresholds: AngleThresholds,
        below_low: ExercisePhase,
        above_high: ExercisePhase,
        /// Checked before the angle; either signal may declare its phase
        position: Option<PositionTrigger>,
    },
    /// Always `Hold`; scored on alignment only
    Isometric,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseRule {
    pub model: PhaseModel,
    /// Tested in order; the first firing fault picks the feedback
    pub faults: &'static [FaultRule],
    pub fault_policy: FaultPolicy,
    /// Instruction shown while between thresholds
    pub ready_cue: &'static str,
    /// Shown when no fault fires in an active or hold phase
    pub good_form_cue: Option<&'static str>,
}

impl ExerciseRule {
    pub fn for_exercise(kind: ExerciseKind) -> Self {
        match kind {
            ExerciseKind::Pushup => PUSHUP,
            ExerciseKind::Squat => SQUAT,
            ExerciseKind::Curl => CURL,
            ExerciseKind::Plank => PLANK,
            ExerciseKind::Pullup => PULLUP,
            ExerciseKind::Lunge => LUNGE,
            ExerciseKind::Press => PRESS,
            ExerciseKind::Row => ROW,
            ExerciseKind::GobletSquat => GOBLET_SQUAT,
            ExerciseKind::LateralRaise => LATERAL_RAISE,
            ExerciseKind::TricepExtension => TRICEP_EXTENSION,
            ExerciseKind::FrontRaise => FRONT_RAISE,
            ExerciseKind::Deadlift => DEADLIFT,
            ExerciseKind::OverheadSquat => OVERHEAD_SQUAT,
        }
    }

    pub fn thresholds(&self) -> Option<AngleThresholds> {
        match self.model {
            PhaseModel::Repetition { thresholds, .. } => Some(thresholds),
            PhaseModel::Isometric => None,
        }
    }

    /// Replace the angle thresholds; isometric rules have none and are returned as-is
    pub fn with_thresholds(mut self, new: AngleThresholds) -> Self {
        if let PhaseModel::Repetition { thresholds, .. } = &mut self.model {
            *thresholds = new;
        }
        self
    }

    /// Every landmark the rule reads, deduplicated, in index order
    pub fn required_landmarks(&self) -> Vec<PoseLandmark> {
        let mut landmarks = Vec::new();
        let signal = match self.model {
            PhaseModel::Repetition { signal, position, .. } => {
                landmarks.extend(signal.joint.left());
                landmarks.extend(signal.joint.right());
                if let Some(trigger) = position {
                    landmarks.extend(trigger.subject.landmarks());
                    landmarks.extend(trigger.reference.landmarks());
                }
                Some(signal)
            }
            PhaseModel::Isometric => None,
        };

        for fault in self.faults {
            match fault.metric {
                FaultMetric::Asymmetry => {
                    debug_assert!(signal.is_some(), "asymmetry needs an angle signal");
                }
                FaultMetric::Gap(a, b) | FaultMetric::Drop(a, b) => {
                    landmarks.extend(a.landmarks());
                    landmarks.extend(b.landmarks());
                }
            }
        }

        landmarks.sort();
        landmarks.dedup();
        landmarks
    }
}

const ELBOWS: AngleSignal = AngleSignal { joint: AngleJoint::Elbow, reduce: AngleReduce::Mean };
const KNEES: AngleSignal = AngleSignal { joint: AngleJoint::Knee, reduce: AngleReduce::Mean };
const SHOULDERS: AngleSignal = AngleSignal { joint: AngleJoint::Shoulder, reduce: AngleReduce::Mean };

const ASYMMETRY_TOLERANCE_DEG: f32 = 15.0;
const ALIGNMENT_TOLERANCE: f32 = 0.1;

const HIPS_AT_KNEES: PositionTrigger = PositionTrigger {
    phase: ExercisePhase::Down,
    subject: BodyPoint::HIPS,
    reference: BodyPoint::KNEES,
    margin: 0.0,
};

const fn asymmetry(cues: &'static [(ExercisePhase, &'static str)]) -> FaultRule {
    FaultRule {
        metric: FaultMetric::Asymmetry,
        tolerance: ASYMMETRY_TOLERANCE_DEG,
        penalty: 20,
        cues,
    }
}

const PUSHUP: ExerciseRule = ExerciseRule {
    model: PhaseModel::Repetition {
        signal: ELBOWS,
        thresholds: AngleThresholds { low: 90.0, high: 160.0 },
        below_low: ExercisePhase::Down,
        above_high: ExercisePhase::Up,
        position: None,
    },
    faults: &[FaultRule {
        metric: FaultMetric::Gap(BodyPoint::Joint(LeftHip), BodyPoint::Joint(LeftShoulder)),
        tolerance: ALIGNMENT_TOLERANCE,
        penalty: 20,
        cues: &[
            (ExercisePhase::Down, "Keep your back straight"),
            (ExercisePhase::Up, "Maintain proper back alignment"),
        ],
    }],
    fault_policy: FaultPolicy::Stack,
    ready_cue: "Lower your body until arms are at 90 degrees",
    good_form_cue: None,
};

const SQUAT: ExerciseRule = ExerciseRule {
    model: PhaseModel::Repetition {
        signal: KNEES,
        thresholds: AngleThresholds { low: 90.0, high: 160.0 },
        below_low: ExercisePhase::Down,
        above_high: ExercisePhase::Up,
        position: None,
    },
    faults: &[asymmetry(&[
        (ExercisePhase::Down, "Keep your knees aligned"),
        (ExercisePhase::Up, "Maintain even weight distribution"),
    ])],
    fault_policy: FaultPolicy::Stack,
    ready_cue: "Lower until thighs are parallel to ground",
    good_form_cue: None,
};

const CURL: ExerciseRule = ExerciseRule {
    model: PhaseModel::Repetition {
        signal: ELBOWS,
        thresholds: AngleThresholds { low: 60.0, high: 150.0 },
        below_low: ExercisePhase::Up,
        above_high: ExercisePhase::Down,
        position: None,
    },
    faults: &[asymmetry(&[
        (ExercisePhase::Up, "Keep both arms moving together"),
        (ExercisePhase::Down, "Maintain even curl motion"),
    ])],
    fault_policy: FaultPolicy::Stack,
    ready_cue: "Full range of motion - extend arms fully",
    good_form_cue: None,
};

const PLANK: ExerciseRule = ExerciseRule {
    model: PhaseModel::Isometric,
    faults: &[
        FaultRule {
            metric: FaultMetric::Gap(BodyPoint::HIPS, BodyPoint::SHOULDERS),
            tolerance: ALIGNMENT_TOLERANCE,
            penalty: 30,
            cues: &[(ExercisePhase::Hold, "Keep your back straight")],
        },
        FaultRule {
            metric: FaultMetric::Gap(BodyPoint::Joint(LeftHip), BodyPoint::Joint(RightHip)),
            tolerance: 0.05,
            penalty: 20,
            cues: &[(ExercisePhase::Hold, "Keep your hips level")],
        },
    ],
    fault_policy: FaultPolicy::FirstOnly,
    ready_cue: "Keep back straight and hips level",
    good_form_cue: Some("Good form - maintain position"),
};

const PULLUP: ExerciseRule = ExerciseRule {
    model: PhaseModel::Repetition {
        signal: ELBOWS,
        thresholds: AngleThresholds { low: 90.0, high: 160.0 },
        below_low: ExercisePhase::Up,
        // hanging with straight arms is only "down" once the chin drops below the shoulders
        above_high: ExercisePhase::Ready,
        // the landmark set has no chin; the ear stands in for it
        position: Some(PositionTrigger {
            phase: ExercisePhase::Down,
            subject: BodyPoint::Joint(LeftEar),
            reference: BodyPoint::SHOULDERS,
            margin: 0.0,
        }),
    },
    faults: &[asymmetry(&[
        (ExercisePhase::Down, "Keep arms even during descent"),
        (ExercisePhase::Up, "Pull evenly with both arms"),
    ])],
    fault_policy: FaultPolicy::Stack,
    ready_cue: "Pull until chin is over the bar",
    good_form_cue: None,
};

const LUNGE: ExerciseRule = ExerciseRule {
    model: PhaseModel::Repetition {
        signal: AngleSignal { joint: AngleJoint::Knee, reduce: AngleReduce::Min },
        thresholds: AngleThresholds { low: 90.0, high: 160.0 },
        below_low: ExercisePhase::Down,
        above_high: ExercisePhase::Up,
        position: None,
    },
    faults: &[FaultRule {
        metric: FaultMetric::Gap(BodyPoint::Joint(LeftHip), BodyPoint::Joint(RightHip)),
        tolerance: ALIGNMENT_TOLERANCE,
        penalty: 20,
        cues: &[
            (ExercisePhase::Down, "Keep hips level during lunge"),
            (ExercisePhase::Up, "Stand tall between lunges"),
        ],
    }],
    fault_policy: FaultPolicy::Stack,
    ready_cue: "Lower until back knee nearly touches ground",
    good_form_cue: None,
};

const PRESS: ExerciseRule = ExerciseRule {
    model: PhaseModel::Repetition {
        signal: ELBOWS,
        thresholds: AngleThresholds { low: 90.0, high: 160.0 },
        below_low: ExercisePhase::Down,
        above_high: ExercisePhase::Up,
        position: None,
    },
    faults: &[asymmetry(&[
        (ExercisePhase::Up, "Press evenly with both arms"),
        (ExercisePhase::Down, "Keep arms even during lowering"),
    ])],
    fault_policy: FaultPolicy::Stack,
    ready_cue: "Press weights straight overhead",
    good_form_cue: None,
};

const ROW: ExerciseRule = ExerciseRule {
    model: PhaseModel::Repetition {
        signal: ELBOWS,
        thresholds: AngleThresholds { low: 60.0, high: 150.0 },
        below_low: ExercisePhase::Up,
        above_high: ExercisePhase::Down,
        position: None,
    },
    faults: &[FaultRule {
        metric: FaultMetric::Gap(BodyPoint::SHOULDERS, BodyPoint::HIPS),
        tolerance: ALIGNMENT_TOLERANCE,
        penalty: 20,
        cues: &[
            (ExercisePhase::Up, "Keep your back straight during the row"),
            (ExercisePhase::Down, "Maintain back position while lowering"),
        ],
    }],
    fault_policy: FaultPolicy::Stack,
    ready_cue: "Pull weights toward your chest",
    good_form_cue: None,
};

const GOBLET_SQUAT: ExerciseRule = ExerciseRule {
    model: PhaseModel::Repetition {
        signal: KNEES,
        thresholds: AngleThresholds { low: 90.0, high: 160.0 },
        below_low: ExercisePhase::Down,
        above_high: ExercisePhase::Up,
        position: Some(HIPS_AT_KNEES),
    },
    faults: &[
        asymmetry(&[
            (ExercisePhase::Down, "Keep your knees tracking evenly"),
            (ExercisePhase::Up, "Drive up evenly through both legs"),
        ]),
        FaultRule {
            metric: FaultMetric::Gap(BodyPoint::WRISTS, BodyPoint::SHOULDERS),
            tolerance: 0.25,
            penalty: 15,
            cues: &[
                (ExercisePhase::Down, "Hold the dumbbell close to your chest"),
                (ExercisePhase::Up, "Hold the dumbbell close to your chest"),
            ],
        },
    ],
    fault_policy: FaultPolicy::Stack,
    ready_cue: "Squat until thighs are parallel, dumbbell at chest",
    good_form_cue: None,
};

const LATERAL_RAISE: ExerciseRule = ExerciseRule {
    model: PhaseModel::Repetition {
        signal: SHOULDERS,
        thresholds: AngleThresholds { low: 30.0, high: 80.0 },
        below_low: ExercisePhase::Down,
        above_high: ExercisePhase::Up,
        position: None,
    },
    faults: &[asymmetry(&[
        (ExercisePhase::Up, "Raise both arms to the same height"),
        (ExercisePhase::Down, "Lower both arms together"),
    ])],
    fault_policy: FaultPolicy::Stack,
    ready_cue: "Raise arms to shoulder level",
    good_form_cue: None,
};

const TRICEP_EXTENSION: ExerciseRule = ExerciseRule {
    model: PhaseModel::Repetition {
        signal: ELBOWS,
        thresholds: AngleThresholds { low: 70.0, high: 150.0 },
        below_low: ExercisePhase::Down,
        above_high: ExercisePhase::Up,
        position: None,
    },
    faults: &[asymmetry(&[
        (ExercisePhase::Down, "Lower the weight evenly"),
        (ExercisePhase::Up, "Extend both arms fully together"),
    ])],
    fault_policy: FaultPolicy::Stack,
    ready_cue: "Extend arms fully behind head",
    good_form_cue: None,
};

const FRONT_RAISE: ExerciseRule = ExerciseRule {
    model: PhaseModel::Repetition {
        signal: SHOULDERS,
        thresholds: AngleThresholds { low: 30.0, high: 80.0 },
        below_low: ExercisePhase::Down,
        above_high: ExercisePhase::Up,
        position: None,
    },
    faults: &[asymmetry(&[
        (ExercisePhase::Up, "Raise both arms evenly"),
        (ExercisePhase::Down, "Control the descent with both arms"),
    ])],
    fault_policy: FaultPolicy::Stack,
    ready_cue: "Raise arms in front to shoulder level",
    good_form_cue: None,
};

const DEADLIFT: ExerciseRule = ExerciseRule {
    model: PhaseModel::Repetition {
        signal: AngleSignal { joint: AngleJoint::Hip, reduce: AngleReduce::Mean },
        thresholds: AngleThresholds { low: 100.0, high: 160.0 },
        below_low: ExercisePhase::Down,
        above_high: ExercisePhase::Up,
        position: None,
    },
    faults: &[asymmetry(&[
        (ExercisePhase::Down, "Keep your hips square"),
        (ExercisePhase::Up, "Lock out evenly at the top"),
    ])],
    fault_policy: FaultPolicy::Stack,
    ready_cue: "Hinge at the hips until the bar passes your knees",
    good_form_cue: None,
};

const OVERHEAD_SQUAT: ExerciseRule = ExerciseRule {
    model: PhaseModel::Repetition {
        signal: KNEES,
        thresholds: AngleThresholds { low: 90.0, high: 160.0 },
        below_low: ExercisePhase::Down,
        above_high: ExercisePhase::Up,
        position: Some(HIPS_AT_KNEES),
    },
    faults: &[
        asymmetry(&[
            (ExercisePhase::Down, "Keep your knees aligned"),
            (ExercisePhase::Up, "Stand up evenly"),
        ]),
        FaultRule {
            metric: FaultMetric::Drop(BodyPoint::WRISTS, BodyPoint::Joint(Nose)),
            tolerance: 0.0,
            penalty: 25,
            cues: &[
                (ExercisePhase::Down, "Keep arms locked overhead"),
                (ExercisePhase::Up, "Keep arms locked overhead"),
            ],
        },
    ],
    fault_policy: FaultPolicy::Stack,
    ready_cue: "Squat until thighs are parallel, arms overhead",
    good_form_cue: None,
};
