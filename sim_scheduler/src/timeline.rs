//! Timeline Recorder
//!
//! Run-length encoded record of who held the CPU. One [`Timeline`] is built
//! per run and owned by that run's result.
//!
//! ## Merging
//!
//! `record` extends the last interval instead of appending when the occupant
//! is the same and the new span starts exactly where the last one ended. A
//! process that runs several consecutive ticks under STCF, or several
//! back-to-back quanta under RR, shows up as one interval. Nothing else is
//! merged and gaps are kept.

use core_types::{ProcessId, Ticks};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What held the CPU during an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupant {
    Idle,
    Process(ProcessId),
}

impl Occupant {
    pub fn is_idle(&self) -> bool {
        matches!(self, Occupant::Idle)
    }

    /// Returns the process id, or `None` for idle
    pub fn process(&self) -> Option<ProcessId> {
        match self {
            Occupant::Idle => None,
            Occupant::Process(id) => Some(*id),
        }
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupant::Idle => write!(f, "IDLE"),
            Occupant::Process(id) => write!(f, "{}", id),
        }
    }
}

/// A maximal `[start, end)` span with one occupant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineInterval {
    pub occupant: Occupant,
    pub start: Ticks,
    pub end: Ticks,
}

impl TimelineInterval {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Ordered, non-overlapping execution intervals for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    intervals: Vec<TimelineInterval>,
}

impl Timeline {
    /// Creates an empty timeline
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Records that `occupant` held the CPU over `[start, end)`
    ///
    /// Empty spans are ignored.
    pub fn record(&mut self, occupant: Occupant, start: Ticks, end: Ticks) {
        debug_assert!(start <= end, "interval [{start}, {end}) is reversed");
        debug_assert!(
            self.end_time() <= start,
            "interval [{start}, {end}) overlaps timeline ending at {}",
            self.end_time()
        );
        if start >= end {
            return;
        }

        if let Some(last) = self.intervals.last_mut() {
            if last.occupant == occupant && last.end == start {
                last.end = end;
                return;
            }
        }

        self.intervals.push(TimelineInterval {
            occupant,
            start,
            end,
        });
    }

    /// Returns all intervals in start order
    pub fn intervals(&self) -> &[TimelineInterval] {
        &self.intervals
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimelineInterval> {
        self.intervals.iter()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// End of the last interval, or 0 if nothing was recorded
    pub fn end_time(&self) -> Ticks {
        self.intervals.last().map_or(0, |interval| interval.end)
    }

    /// Intervals attributed to `process`
    pub fn intervals_for(&self, process: ProcessId) -> impl Iterator<Item = &TimelineInterval> {
        self.intervals
            .iter()
            .filter(move |interval| interval.occupant == Occupant::Process(process))
    }

    /// Total ticks `process` spent on the CPU
    pub fn busy_time_of(&self, process: ProcessId) -> Ticks {
        self.intervals_for(process)
            .map(TimelineInterval::duration)
            .sum()
    }

    /// Total ticks the CPU was idle
    pub fn idle_time(&self) -> Ticks {
        self.intervals
            .iter()
            .filter(|interval| interval.occupant.is_idle())
            .map(TimelineInterval::duration)
            .sum()
    }
}
