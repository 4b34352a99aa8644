// Library exports for the rep coach tracking core

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::TrackerConfig;
pub use error::{CoachError, CoachResult};
pub use services::WorkoutSession;
