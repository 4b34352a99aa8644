pub mod tracker;

pub use tracker::{ThresholdOverride, TrackerConfig};
