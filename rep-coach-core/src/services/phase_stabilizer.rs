/// Phase Stabilizer
///
/// Debounces raw per-frame phase labels into committed phase changes. Transitions are
/// gated by how many consecutive frames agree, never by time; a session can sit in any
/// phase indefinitely.

use tracing::debug;

use crate::models::phase::{ExercisePhase, PhaseTransition};

/// Result of feeding one raw label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseUpdate {
    pub committed: ExercisePhase,
    pub transition: Option<PhaseTransition>,
    pub confidence: f32,
}

impl PhaseUpdate {
    /// Whether this update committed a down to up change
    pub fn is_rep_candidate(&self) -> bool {
        self.transition.map_or(false, |t| t.completes_rep())
    }
}

#[derive(Debug, Clone)]
pub struct PhaseStabilizer {
    committed_phase: ExercisePhase,
    last_raw_phase: ExercisePhase,
    /// Consecutive frames that agreed with the previous raw label
    stable_run_length: u32,
    state_confidence: f32,
}

impl PhaseStabilizer {
    pub fn new() -> Self {
        Self {
            committed_phase: ExercisePhase::Ready,
            last_raw_phase: ExercisePhase::Ready,
            stable_run_length: 0,
            state_confidence: 0.0,
        }
    }

    pub fn committed_phase(&self) -> ExercisePhase {
        self.committed_phase
    }

    pub fn last_raw_phase(&self) -> ExercisePhase {
        self.last_raw_phase
    }

    pub fn stable_run_length(&self) -> u32 {
        self.stable_run_length
    }

    pub fn confidence(&self) -> f32 {
        self.state_confidence
    }

    /// Feed the raw label of the next frame
    pub fn observe(&mut self, raw: ExercisePhase) -> PhaseUpdate {
        if raw == self.last_raw_phase {
            self.stable_run_length += 1;
        } else {
            self.stable_run_length = 0;
            self.last_raw_phase = raw;
        }

        self.state_confidence = (self.stable_run_length as f32 / 3.0).min(1.0);

        // the current frame counts towards its own run
        let frames_in_run = self.stable_run_length + 1;
        let mut transition = None;

        if frames_in_run >= raw.frames_to_commit() && raw != self.committed_phase {
            transition = Some(self.commit(raw));
        }

        // leave ready as soon as movement shows up, regardless of the general rule
        if self.committed_phase == ExercisePhase::Ready && raw.is_active() && frames_in_run >= 1 {
            transition = Some(self.commit(raw));
        }
        // covered by the clause above; kept on purpose as the explicit down-from-ready rule
        if raw == ExercisePhase::Down && self.committed_phase == ExercisePhase::Ready && frames_in_run >= 1 {
            transition = Some(self.commit(raw));
        }

        PhaseUpdate {
            committed: self.committed_phase,
            transition,
            confidence: self.state_confidence,
        }
    }

    /// Return to the initial ready state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Drop the committed phase back to ready, keeping the raw run
    pub fn return_to_ready(&mut self) {
        self.committed_phase = ExercisePhase::Ready;
    }

    fn commit(&mut self, to: ExercisePhase) -> PhaseTransition {
        let transition = PhaseTransition {
            from: self.committed_phase,
            to,
        };
        debug!(from = %transition.from, to = %transition.to, run = self.stable_run_length, "phase committed");
        self.committed_phase = to;
        transition
    }
}

impl Default for PhaseStabilizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ExercisePhase::*;

    fn feed(stabilizer: &mut PhaseStabilizer, phases: &[ExercisePhase]) -> Vec<PhaseUpdate> {
        phases.iter().map(|p| stabilizer.observe(*p)).collect()
    }

    #[test]
    fn test_initial_state() {
        let stabilizer = PhaseStabilizer::new();
        assert_eq!(stabilizer.committed_phase(), Ready);
        assert_eq!(stabilizer.last_raw_phase(), Ready);
        assert_eq!(stabilizer.stable_run_length(), 0);
        assert_eq!(stabilizer.confidence(), 0.0);
    }

    #[test]
    fn test_single_down_from_ready_commits() {
        let mut stabilizer = PhaseStabilizer::new();
        let update = stabilizer.observe(Down);
        assert_eq!(update.committed, Down);
        assert_eq!(update.transition, Some(PhaseTransition { from: Ready, to: Down }));
        assert!(!update.is_rep_candidate());
    }

    #[test]
    fn test_single_up_after_down_is_rep_candidate() {
        let mut stabilizer = PhaseStabilizer::new();
        stabilizer.observe(Down);
        let update = stabilizer.observe(Up);
        assert_eq!(update.committed, Up);
        assert!(update.is_rep_candidate());
    }

    #[test]
    fn test_single_ready_frame_does_not_commit() {
        let mut stabilizer = PhaseStabilizer::new();
        stabilizer.observe(Down);
        let update = stabilizer.observe(Ready);
        assert_eq!(update.committed, Down);
        assert_eq!(update.transition, None);

        let update = stabilizer.observe(Ready);
        assert_eq!(update.committed, Ready);
        assert_eq!(update.transition, Some(PhaseTransition { from: Down, to: Ready }));
    }

    #[test]
    fn test_hold_needs_two_frames() {
        let mut stabilizer = PhaseStabilizer::new();
        let updates = feed(&mut stabilizer, &[Hold, Hold]);
        assert_eq!(updates[0].committed, Ready);
        assert_eq!(updates[1].committed, Hold);
    }

    #[test]
    fn test_jitter_between_ready_and_down_stays_down() {
        let mut stabilizer = PhaseStabilizer::new();
        let updates = feed(&mut stabilizer, &[Down, Ready, Down, Ready, Down]);
        assert!(updates.iter().all(|u| u.committed == Down));
    }

    #[test]
    fn test_confidence_ramps_with_agreement() {
        let mut stabilizer = PhaseStabilizer::new();
        let updates = feed(&mut stabilizer, &[Down, Down, Down, Down, Down]);
        let confidences: Vec<f32> = updates.iter().map(|u| u.confidence).collect();
        assert_eq!(confidences[0], 0.0);
        assert!((confidences[1] - 1.0 / 3.0).abs() < 1e-6);
        assert!((confidences[2] - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(confidences[3], 1.0);
        assert_eq!(confidences[4], 1.0);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut stabilizer = PhaseStabilizer::new();
        feed(&mut stabilizer, &[Down, Down, Up]);
        stabilizer.reset();
        assert_eq!(stabilizer.committed_phase(), Ready);
        assert_eq!(stabilizer.stable_run_length(), 0);
    }
}
