/// Workout Session
///
/// Owns the per-session pipeline: classifier, phase stabilizer and rep counter. One
/// frame in, one overlay out. A session is advanced by a single caller at a time; wrap
/// it in a mutex or feed it from one channel when frames and readers live on different
/// threads.

use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::TrackerConfig;
use crate::error::CoachResult;
use crate::models::classification::{FrameAssessment, POSE_NOT_VISIBLE};
use crate::models::exercise::ExerciseDefinition;
use crate::models::keypoint::PoseFrame;
use crate::models::phase::ExercisePhase;
use crate::models::session::{FrameOverlay, SessionCommand, SessionSnapshot};
use crate::services::exercise_catalog::ExerciseCatalog;
use crate::services::frame_classifier::FrameClassifier;
use crate::services::phase_stabilizer::PhaseStabilizer;
use crate::services::rep_counter::{RepCounter, RepDecision};

const INITIAL_FORM_SCORE: u8 = 100;

#[derive(Debug)]
pub struct WorkoutSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    catalog: ExerciseCatalog,
    exercise: ExerciseDefinition,
    classifier: FrameClassifier,
    stabilizer: PhaseStabilizer,
    counter: RepCounter,
    set_count: u32,
    form_score: u8,
    feedback: Option<String>,
    frames_processed: u64,
}

impl WorkoutSession {
    /// Start a session for `exercise_id`; unknown ids and bad configuration fail here
    pub fn new(exercise_id: &str, config: &TrackerConfig) -> CoachResult<Self> {
        let catalog = ExerciseCatalog::from_config(config)?;
        let exercise = catalog.lookup(exercise_id)?.clone();

        info!(exercise = exercise.id(), "workout session started");

        Ok(Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            catalog,
            exercise,
            classifier: FrameClassifier::new().with_min_confidence(config.confidence_threshold),
            stabilizer: PhaseStabilizer::new(),
            counter: RepCounter::new(Duration::from_millis(config.min_rep_interval_ms)),
            set_count: 1,
            form_score: INITIAL_FORM_SCORE,
            feedback: None,
            frames_processed: 0,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn exercise(&self) -> &ExerciseDefinition {
        &self.exercise
    }

    pub fn phase(&self) -> ExercisePhase {
        self.stabilizer.committed_phase()
    }

    pub fn state_confidence(&self) -> f32 {
        self.stabilizer.confidence()
    }

    pub fn rep_count(&self) -> u32 {
        self.counter.rep_count()
    }

    pub fn total_rep_count(&self) -> u32 {
        self.counter.total_rep_count()
    }

    pub fn set_count(&self) -> u32 {
        self.set_count
    }

    pub fn average_rep_duration(&self) -> f64 {
        self.counter.average_rep_duration()
    }

    pub fn form_score(&self) -> u8 {
        self.form_score
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Run one frame through classifier, stabilizer and counter
    pub fn process_frame(&mut self, frame: &PoseFrame) -> FrameOverlay {
        self.frames_processed += 1;

        let raw_phase = match self.classifier.classify(&self.exercise.rule, frame) {
            FrameAssessment::Classified(classification) => {
                self.form_score = classification.form_score;
                self.feedback = classification.feedback;
                classification.phase
            }
            FrameAssessment::InsufficientData { missing } => {
                debug!(frame = frame.frame_number, landmark = missing.name(), "landmark not visible");
                self.feedback = Some(POSE_NOT_VISIBLE.to_string());
                self.stabilizer.committed_phase()
            }
        };

        let update = self.stabilizer.observe(raw_phase);
        let rep_completed =
            update.is_rep_candidate() && self.counter.offer(frame.timestamp_ms) == RepDecision::Accepted;

        FrameOverlay {
            timestamp_ms: frame.timestamp_ms,
            phase: update.committed,
            rep_count: self.counter.rep_count(),
            form_score: self.form_score,
            confidence: update.confidence,
            feedback: self.feedback.clone(),
            rep_completed,
        }
    }

    pub fn apply(&mut self, command: SessionCommand) -> CoachResult<()> {
        match command {
            SessionCommand::SelectExercise(id) => self.select_exercise(&id),
            SessionCommand::ResetWorkout => {
                self.reset_workout();
                Ok(())
            }
            SessionCommand::CompleteSet => {
                self.complete_set();
                Ok(())
            }
        }
    }

    /// Switch exercise; phase tracking restarts, counters are kept
    pub fn select_exercise(&mut self, exercise_id: &str) -> CoachResult<()> {
        let exercise = self.catalog.lookup(exercise_id)?.clone();
        info!(from = self.exercise.id(), to = exercise.id(), "exercise selected");
        self.exercise = exercise;
        self.stabilizer.reset();
        Ok(())
    }

    /// Zero every counter and return to the initial state
    pub fn reset_workout(&mut self) {
        self.counter.reset();
        self.stabilizer.reset();
        self.set_count = 1;
        self.form_score = INITIAL_FORM_SCORE;
        self.feedback = None;
        info!(session = %self.id, "workout reset");
    }

    /// Close the current set; totals and timing carry over
    pub fn complete_set(&mut self) {
        info!(set = self.set_count, reps = self.counter.rep_count(), "set completed");
        self.set_count += 1;
        self.counter.start_new_set();
        self.stabilizer.return_to_ready();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            started_at: self.started_at,
            exercise: self.exercise.kind,
            exercise_name: self.exercise.name.to_string(),
            phase: self.phase(),
            state_confidence: self.state_confidence(),
            rep_count: self.rep_count(),
            set_count: self.set_count,
            total_rep_count: self.total_rep_count(),
            average_rep_duration: self.average_rep_duration(),
            form_score: self.form_score,
            feedback: self.feedback.clone(),
            frames_processed: self.frames_processed,
        }
    }
}
