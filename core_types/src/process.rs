//! Process entity and its per-run state

use crate::ids::{ProcessId, Ticks};
use serde::{Deserialize, Serialize};

/// Metrics derived from a finished process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// completion - arrival
    pub turnaround_time: Ticks,
    /// turnaround - burst
    pub waiting_time: Ticks,
    /// first run - arrival
    pub response_time: Ticks,
}

/// One schedulable unit
///
/// `arrival_time`, `burst_time` and `priority` are fixed at load. The
/// remaining fields are run state, owned by whichever policy is simulating
/// the table, and are cleared by [`Process::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    /// Carried through for workload compatibility; no policy reads it.
    pub priority: i64,
    pub remaining_time: Ticks,
    pub first_run_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub metrics: Option<ProcessMetrics>,
}

impl Process {
    /// Creates a process in its pre-run state
    pub fn new(id: ProcessId, arrival_time: Ticks, burst_time: Ticks, priority: i64) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority,
            remaining_time: burst_time,
            first_run_time: None,
            completion_time: None,
            metrics: None,
        }
    }

    /// Clears all run state, keeping the static attributes
    pub fn reset(&mut self) {
        self.remaining_time = self.burst_time;
        self.first_run_time = None;
        self.completion_time = None;
        self.metrics = None;
    }

    /// Returns true if the process has arrived by `now`
    pub fn has_arrived(&self, now: Ticks) -> bool {
        self.arrival_time <= now
    }

    /// Returns true once the process has finished its burst
    pub fn is_complete(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Returns true if the process has arrived by `now` and still has work
    pub fn is_eligible(&self, now: Ticks) -> bool {
        self.has_arrived(now) && !self.is_complete()
    }

    /// Records the first dispatch time
    ///
    /// Returns true if this was the first dispatch.
    pub fn mark_dispatched(&mut self, now: Ticks) -> bool {
        debug_assert!(
            self.has_arrived(now),
            "{} dispatched at {} before arrival {}",
            self.id,
            now,
            self.arrival_time
        );
        if self.first_run_time.is_some() {
            return false;
        }
        self.first_run_time = Some(now);
        true
    }

    /// Consumes `ticks` of CPU time ending at `end`
    ///
    /// Returns true if this finished the process, in which case the
    /// completion time is set to `end`.
    pub fn execute(&mut self, ticks: Ticks, end: Ticks) -> bool {
        debug_assert!(
            ticks <= self.remaining_time,
            "{} ran {} ticks with only {} remaining",
            self.id,
            ticks,
            self.remaining_time
        );
        self.remaining_time = self.remaining_time.saturating_sub(ticks);
        if self.remaining_time == 0 && self.completion_time.is_none() {
            self.completion_time = Some(end);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Process {
        Process::new(ProcessId::new(1), 2, 5, 0)
    }

    #[test]
    fn test_new_process_is_pre_run() {
        let process = sample();
        assert_eq!(process.remaining_time, 5);
        assert!(process.first_run_time.is_none());
        assert!(process.completion_time.is_none());
        assert!(process.metrics.is_none());
    }

    #[test]
    fn test_arrival_and_eligibility() {
        let process = sample();
        assert!(!process.has_arrived(1));
        assert!(process.has_arrived(2));
        assert!(process.is_eligible(3));
    }

    #[test]
    fn test_mark_dispatched_only_once() {
        let mut process = sample();
        assert!(process.mark_dispatched(3));
        assert!(!process.mark_dispatched(6));
        assert_eq!(process.first_run_time, Some(3));
    }

    #[test]
    fn test_execute_records_completion_once() {
        let mut process = sample();
        process.mark_dispatched(2);
        assert!(!process.execute(3, 5));
        assert_eq!(process.remaining_time, 2);
        assert!(process.execute(2, 7));
        assert_eq!(process.completion_time, Some(7));
        assert!(!process.is_eligible(8));
    }

    #[test]
    fn test_reset_restores_pre_run_state() {
        let mut process = sample();
        process.mark_dispatched(2);
        process.execute(5, 7);
        process.metrics = Some(ProcessMetrics {
            turnaround_time: 5,
            waiting_time: 0,
            response_time: 0,
        });

        process.reset();

        assert_eq!(process, sample());
    }
}
