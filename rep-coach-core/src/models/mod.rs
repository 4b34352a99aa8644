// Data models for pose frames, exercises and session state

pub mod classification;
pub mod exercise;
pub mod exercise_rule;
pub mod keypoint;
pub mod phase;
pub mod session;

pub use classification::*;
pub use exercise::*;
pub use exercise_rule::*;
pub use keypoint::*;
pub use phase::*;
pub use session::*;
