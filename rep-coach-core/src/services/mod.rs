pub mod exercise_catalog;
pub mod frame_classifier;
pub mod geometry;
pub mod phase_stabilizer;
pub mod rep_counter;
pub mod workout_session;

pub use exercise_catalog::ExerciseCatalog;
pub use frame_classifier::FrameClassifier;
pub use phase_stabilizer::{PhaseStabilizer, PhaseUpdate};
pub use rep_counter::{RepCounter, RepDecision};
pub use workout_session::WorkoutSession;
