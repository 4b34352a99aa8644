/// Keypoint models and pose frames
///
/// A pose frame is one instant of skeletal landmarks as delivered by an external
/// pose estimator: 33 indexed body landmarks in normalized image space, each with a
/// detection confidence.

use serde::{Deserialize, Serialize};

/// Number of landmarks in a full body pose
pub const LANDMARK_COUNT: usize = 33;

/// A single body landmark position with detection confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// X coordinate (normalized 0-1, left to right)
    pub x: f32,
    /// Y coordinate (normalized 0-1, top to bottom)
    pub y: f32,
    /// Detection confidence (0-1)
    #[serde(alias = "visibility")]
    pub confidence: f32,
}

impl Keypoint {
    /// Create a new keypoint
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self { x, y, confidence }
    }

    /// Check if keypoint is usable (finite coordinates and sufficient confidence)
    pub fn is_valid(&self, min_confidence: f32) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.confidence >= min_confidence
    }

    /// Point halfway between two keypoints, carrying the weaker confidence
    pub fn midpoint(&self, other: &Keypoint) -> Keypoint {
        Keypoint {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            confidence: self.confidence.min(other.confidence),
        }
    }
}

/// Body landmark indices (33-point full body model)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    /// Index of this landmark within a frame
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get landmark name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEyeInner => "left_eye_inner",
            Self::LeftEye => "left_eye",
            Self::LeftEyeOuter => "left_eye_outer",
            Self::RightEyeInner => "right_eye_inner",
            Self::RightEye => "right_eye",
            Self::RightEyeOuter => "right_eye_outer",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::MouthLeft => "mouth_left",
            Self::MouthRight => "mouth_right",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftPinky => "left_pinky",
            Self::RightPinky => "right_pinky",
            Self::LeftIndex => "left_index",
            Self::RightIndex => "right_index",
            Self::LeftThumb => "left_thumb",
            Self::RightThumb => "right_thumb",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }

    /// Get all landmarks in index order
    pub fn all() -> [Self; LANDMARK_COUNT] {
        [
            Self::Nose,
            Self::LeftEyeInner,
            Self::LeftEye,
            Self::LeftEyeOuter,
            Self::RightEyeInner,
            Self::RightEye,
            Self::RightEyeOuter,
            Self::LeftEar,
            Self::RightEar,
            Self::MouthLeft,
            Self::MouthRight,
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftElbow,
            Self::RightElbow,
            Self::LeftWrist,
            Self::RightWrist,
            Self::LeftPinky,
            Self::RightPinky,
            Self::LeftIndex,
            Self::RightIndex,
            Self::LeftThumb,
            Self::RightThumb,
            Self::LeftHip,
            Self::RightHip,
            Self::LeftKnee,
            Self::RightKnee,
            Self::LeftAnkle,
            Self::RightAnkle,
            Self::LeftHeel,
            Self::RightHeel,
            Self::LeftFootIndex,
            Self::RightFootIndex,
        ]
    }
}

/// One frame of pose landmarks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Frame timestamp in milliseconds on the producer's monotonic clock
    pub timestamp_ms: u64,
    /// Frame number in sequence
    #[serde(default)]
    pub frame_number: u32,
    /// Landmarks in index order; a short list means the tail is missing
    pub keypoints: Vec<Keypoint>,
}

impl PoseFrame {
    /// Create a new pose frame
    pub fn new(timestamp_ms: u64, frame_number: u32, keypoints: Vec<Keypoint>) -> Self {
        Self {
            timestamp_ms,
            frame_number,
            keypoints,
        }
    }

    /// Get keypoint by landmark
    pub fn keypoint(&self, landmark: PoseLandmark) -> Option<&Keypoint> {
        self.keypoints.get(landmark.index())
    }

    /// Get keypoint only if it clears the confidence threshold
    pub fn visible_keypoint(&self, landmark: PoseLandmark, min_confidence: f32) -> Option<&Keypoint> {
        self.keypoint(landmark)
            .filter(|kp| kp.is_valid(min_confidence))
    }

    /// First landmark in `landmarks` that is missing or below the threshold
    pub fn first_hidden(&self, landmarks: &[PoseLandmark], min_confidence: f32) -> Option<PoseLandmark> {
        landmarks
            .iter()
            .copied()
            .find(|lm| self.visible_keypoint(*lm, min_confidence).is_none())
    }
}
