/// Repetition Counter
///
/// Accepts rep candidates (committed down to up changes) and counts them, enforcing a
/// minimum interval between counted reps so phase flapping at the boundary cannot
/// double count.

use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of offering a rep candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepDecision {
    Accepted,
    /// Arrived within the minimum interval of the previous rep
    TooSoon,
    /// Timestamp not after the previous rep; the interval is unknown
    OutOfOrder,
}

#[derive(Debug, Clone)]
pub struct RepCounter {
    min_interval: Duration,
    rep_count: u32,
    total_rep_count: u32,
    last_rep_timestamp_ms: Option<u64>,
    /// Mean of intervals between consecutive accepted reps, seconds
    average_rep_duration: f64,
    intervals_recorded: u32,
}

impl RepCounter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            rep_count: 0,
            total_rep_count: 0,
            last_rep_timestamp_ms: None,
            average_rep_duration: 0.0,
            intervals_recorded: 0,
        }
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    pub fn total_rep_count(&self) -> u32 {
        self.total_rep_count
    }

    pub fn average_rep_duration(&self) -> f64 {
        self.average_rep_duration
    }

    pub fn last_rep_timestamp_ms(&self) -> Option<u64> {
        self.last_rep_timestamp_ms
    }

    /// Offer a rep candidate observed at `timestamp_ms`
    pub fn offer(&mut self, timestamp_ms: u64) -> RepDecision {
        let interval = match self.last_rep_timestamp_ms {
            None => None,
            Some(last) if timestamp_ms <= last => {
                warn!(timestamp_ms, last_rep_ms = last, "rep candidate out of order, dropping");
                return RepDecision::OutOfOrder;
            }
            Some(last) => {
                let elapsed = Duration::from_millis(timestamp_ms - last);
                if elapsed <= self.min_interval {
                    debug!(elapsed_ms = elapsed.as_millis() as u64, "rep candidate too soon, dropping");
                    return RepDecision::TooSoon;
                }
                Some(elapsed)
            }
        };

        self.rep_count += 1;
        self.total_rep_count += 1;
        self.last_rep_timestamp_ms = Some(timestamp_ms);

        if let Some(elapsed) = interval {
            self.intervals_recorded += 1;
            let n = f64::from(self.intervals_recorded);
            self.average_rep_duration += (elapsed.as_secs_f64() - self.average_rep_duration) / n;
        }

        info!(
            rep = self.rep_count,
            total = self.total_rep_count,
            avg_secs = self.average_rep_duration,
            "rep counted"
        );
        RepDecision::Accepted
    }

    /// Start a new set; totals, timing and the interval gate carry over
    pub fn start_new_set(&mut self) {
        self.rep_count = 0;
    }

    /// Back to initial values
    pub fn reset(&mut self) {
        *self = Self::new(self.min_interval);
    }
}
