use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;

use crate::error::{CoachError, CoachResult};
use crate::models::exercise::ExerciseKind;
use crate::models::exercise_rule::AngleThresholds;

/// Tuning knobs for a tracking session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Landmarks below this confidence are treated as not visible
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// Collected for future penalty scaling; no classifier reads it yet
    #[serde(default = "default_feedback_sensitivity")]
    pub feedback_sensitivity: f32,

    /// Minimum gap between two counted repetitions
    #[serde(default = "default_min_rep_interval_ms")]
    pub min_rep_interval_ms: u64,

    /// Per-exercise angle threshold overrides, keyed by exercise id
    #[serde(default)]
    pub thresholds: BTreeMap<String, ThresholdOverride>,
}

/// Replacement angle thresholds; an omitted bound keeps the built-in value
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThresholdOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f32>,
}

impl ThresholdOverride {
    pub fn apply(&self, base: AngleThresholds) -> AngleThresholds {
        AngleThresholds {
            low: self.low.unwrap_or(base.low),
            high: self.high.unwrap_or(base.high),
        }
    }
}

// Default value functions
fn default_confidence_threshold() -> f32 {
    0.5
}

fn default_feedback_sensitivity() -> f32 {
    0.5
}

fn default_min_rep_interval_ms() -> u64 {
    400
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            feedback_sensitivity: default_feedback_sensitivity(),
            min_rep_interval_ms: default_min_rep_interval_ms(),
            thresholds: BTreeMap::new(),
        }
    }
}

impl TrackerConfig {
    /// Apply `REP_COACH_*` environment overrides
    pub fn with_env_overrides(mut self) -> CoachResult<Self> {
        if let Some(value) = env_value("REP_COACH_CONFIDENCE_THRESHOLD")? {
            self.confidence_threshold = value;
        }
        if let Some(value) = env_value("REP_COACH_FEEDBACK_SENSITIVITY")? {
            self.feedback_sensitivity = value;
        }
        if let Some(value) = env_value("REP_COACH_MIN_REP_INTERVAL_MS")? {
            self.min_rep_interval_ms = value;
        }
        Ok(self)
    }

    /// Check ranges and threshold overrides
    pub fn validate(&self) -> CoachResult<()> {
        check_unit_range("confidence_threshold", self.confidence_threshold)?;
        check_unit_range("feedback_sensitivity", self.feedback_sensitivity)?;

        for id in self.thresholds.keys() {
            let kind: ExerciseKind = id.parse()?;
            self.thresholds_for(kind)?;
        }

        Ok(())
    }

    /// Effective thresholds for an exercise after overrides, `None` for isometric ones
    pub fn thresholds_for(&self, kind: ExerciseKind) -> CoachResult<Option<AngleThresholds>> {
        let base = crate::models::exercise_rule::ExerciseRule::for_exercise(kind).thresholds();
        let Some(override_) = self.thresholds.get(kind.id()) else {
            return Ok(base);
        };
        let Some(base) = base else {
            return Err(CoachError::InvalidConfig(format!(
                "{} has no angle thresholds to override",
                kind.id()
            )));
        };

        let effective = override_.apply(base);
        if !(effective.low.is_finite() && effective.high.is_finite()) || effective.low >= effective.high {
            return Err(CoachError::InvalidThresholds {
                exercise: kind.id().to_string(),
                low: effective.low,
                high: effective.high,
            });
        }
        Ok(Some(effective))
    }
}

fn check_unit_range(name: &str, value: f32) -> CoachResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoachError::InvalidConfig(format!(
            "{name} must be between 0 and 1, got {value}"
        )))
    }
}

fn env_value<T: FromStr>(key: &str) -> CoachResult<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CoachError::InvalidConfig(format!("{key} has an invalid value: {raw}"))),
        Err(_) => Ok(None),
    }
}
