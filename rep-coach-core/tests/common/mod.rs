// Shared fixtures for rep-coach-core integration tests
#![allow(dead_code)]

use rep_coach_core::models::{Keypoint, PoseFrame, PoseLandmark, LANDMARK_COUNT};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Limb segment length in normalized image units
const SEGMENT: f32 = 0.15;

/// Builds synthetic pose frames from joint angles
///
/// Limbs are chained outwards from the shoulders: each joint is placed so that the
/// angle at the previous joint equals the requested value. Left-side limbs rotate one
/// way and right-side limbs the other, so left/right angles are independent.
#[derive(Debug, Clone)]
pub struct PoseBuilder {
    shoulder_y: f32,
    /// Vector from each shoulder to the hip below it
    torso: (f32, f32),
    left_hip_lift: f32,
    /// Nose height above the shoulder line (negative: below)
    head_height: f32,
    shoulder_angle: (f32, f32),
    elbow_angle: (f32, f32),
    hip_angle: (f32, f32),
    knee_angle: (f32, f32),
    confidence: f32,
    hidden: Vec<PoseLandmark>,
}

impl PoseBuilder {
    /// Upright stance, arms hanging, legs straight
    pub fn standing() -> Self {
        Self {
            shoulder_y: 0.3,
            torso: (0.0, 0.3),
            left_hip_lift: 0.0,
            head_height: 0.15,
            shoulder_angle: (10.0, 10.0),
            elbow_angle: (170.0, 170.0),
            hip_angle: (175.0, 175.0),
            knee_angle: (175.0, 175.0),
            confidence: 0.9,
            hidden: Vec::new(),
        }
    }

    /// Body horizontal with shoulders and hips nearly level (push-up, plank, row)
    pub fn horizontal() -> Self {
        Self {
            shoulder_y: 0.5,
            torso: (0.35, 0.05),
            ..Self::standing()
        }
    }

    pub fn elbows(mut self, degrees: f32) -> Self {
        self.elbow_angle = (degrees, degrees);
        self
    }

    pub fn elbow_pair(mut self, left: f32, right: f32) -> Self {
        self.elbow_angle = (left, right);
        self
    }

    pub fn knees(mut self, degrees: f32) -> Self {
        self.knee_angle = (degrees, degrees);
        self
    }

    pub fn knee_pair(mut self, left: f32, right: f32) -> Self {
        self.knee_angle = (left, right);
        self
    }

    pub fn hips(mut self, degrees: f32) -> Self {
        self.hip_angle = (degrees, degrees);
        self
    }

    pub fn shoulders(mut self, degrees: f32) -> Self {
        self.shoulder_angle = (degrees, degrees);
        self
    }

    pub fn shoulder_pair(mut self, left: f32, right: f32) -> Self {
        self.shoulder_angle = (left, right);
        self
    }

    /// Vertical shoulder-to-hip offset
    pub fn torso_drop(mut self, dy: f32) -> Self {
        self.torso.1 = dy;
        self
    }

    /// Raise the left hip relative to the right
    pub fn left_hip_lift(mut self, dy: f32) -> Self {
        self.left_hip_lift = dy;
        self
    }

    pub fn head_height(mut self, dy: f32) -> Self {
        self.head_height = dy;
        self
    }

    pub fn confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Report a landmark with zero confidence
    pub fn hide(mut self, landmark: PoseLandmark) -> Self {
        self.hidden.push(landmark);
        self
    }

    pub fn build(&self, timestamp_ms: u64) -> PoseFrame {
        use PoseLandmark::*;

        let conf = self.confidence;
        let mut keypoints = vec![Keypoint::new(0.5, 0.5, conf); LANDMARK_COUNT];
        let mut set = |lm: PoseLandmark, kp: Keypoint| keypoints[lm.index()] = kp;

        let left_shoulder = Keypoint::new(0.4, self.shoulder_y, conf);
        let right_shoulder = Keypoint::new(0.6, self.shoulder_y, conf);
        let left_hip = Keypoint::new(
            0.4 + self.torso.0,
            self.shoulder_y + self.torso.1 - self.left_hip_lift,
            conf,
        );
        let right_hip = Keypoint::new(0.6 + self.torso.0, self.shoulder_y + self.torso.1, conf);

        let left_elbow = place(&left_hip, &left_shoulder, self.shoulder_angle.0, false, conf);
        let right_elbow = place(&right_hip, &right_shoulder, self.shoulder_angle.1, true, conf);
        let left_wrist = place(&left_shoulder, &left_elbow, self.elbow_angle.0, false, conf);
        let right_wrist = place(&right_shoulder, &right_elbow, self.elbow_angle.1, true, conf);

        let left_knee = place(&left_shoulder, &left_hip, self.hip_angle.0, false, conf);
        let right_knee = place(&right_shoulder, &right_hip, self.hip_angle.1, true, conf);
        let left_ankle = place(&left_hip, &left_knee, self.knee_angle.0, false, conf);
        let right_ankle = place(&right_hip, &right_knee, self.knee_angle.1, true, conf);

        let head_y = self.shoulder_y - self.head_height;
        set(Nose, Keypoint::new(0.5, head_y, conf));
        set(LeftEar, Keypoint::new(0.46, head_y, conf));
        set(RightEar, Keypoint::new(0.54, head_y, conf));
        set(LeftShoulder, left_shoulder);
        set(RightShoulder, right_shoulder);
        set(LeftElbow, left_elbow);
        set(RightElbow, right_elbow);
        set(LeftWrist, left_wrist);
        set(RightWrist, right_wrist);
        set(LeftHip, left_hip);
        set(RightHip, right_hip);
        set(LeftKnee, left_knee);
        set(RightKnee, right_knee);
        set(LeftAnkle, left_ankle);
        set(RightAnkle, right_ankle);

        for landmark in &self.hidden {
            keypoints[landmark.index()].confidence = 0.0;
        }

        PoseFrame::new(timestamp_ms, (timestamp_ms / 33) as u32, keypoints)
    }
}

/// Place a point one segment from `vertex` so the angle from `towards` is `degrees`
fn place(towards: &Keypoint, vertex: &Keypoint, degrees: f32, mirror: bool, conf: f32) -> Keypoint {
    let (dx, dy) = (towards.x - vertex.x, towards.y - vertex.y);
    let len = (dx * dx + dy * dy).sqrt();
    let (ux, uy) = (dx / len, dy / len);
    let theta = if mirror { -degrees } else { degrees }.to_radians();
    let (sin, cos) = theta.sin_cos();
    Keypoint::new(
        vertex.x + SEGMENT * (ux * cos - uy * sin),
        vertex.y + SEGMENT * (ux * sin + uy * cos),
        conf,
    )
}

/// Frames from `builders`, each repeated `count` times, `step_ms` apart starting at `start_ms`
pub fn sequence(start_ms: u64, step_ms: u64, steps: &[(&PoseBuilder, usize)]) -> Vec<PoseFrame> {
    let mut frames = Vec::new();
    let mut t = start_ms;
    for (builder, count) in steps {
        for _ in 0..*count {
            frames.push(builder.build(t));
            t += step_ms;
        }
    }
    frames
}
