//! Workload loading
//!
//! Turns raw `(arrival, burst[, priority])` records into a [`ProcessTable`].
//! Records arrive as signed integers so that bad input is rejected here
//! rather than wrapped or truncated by whatever parsed it.

use crate::config::SimConfig;
use crate::error::{SchedError, WorkloadViolation};
use core_types::{Process, ProcessId, Ticks};
use serde::{Deserialize, Serialize};

/// One process descriptor as supplied by a workload source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadEntry {
    pub arrival_time: i64,
    pub burst_time: i64,
    #[serde(default)]
    pub priority: Option<i64>,
}

impl WorkloadEntry {
    /// Creates an entry with no priority
    pub fn new(arrival_time: i64, burst_time: i64) -> Self {
        Self {
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    /// Sets the priority
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    fn validate(&self, index: usize) -> Result<(), WorkloadViolation> {
        if self.arrival_time < 0 {
            return Err(WorkloadViolation::NegativeArrival {
                index,
                arrival: self.arrival_time,
            });
        }
        if self.burst_time <= 0 {
            return Err(WorkloadViolation::NonPositiveBurst {
                index,
                burst: self.burst_time,
            });
        }
        Ok(())
    }
}

/// Processes in load order
///
/// Load order is id order. Policies that need another order build it
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTable {
    processes: Vec<Process>,
}

impl ProcessTable {
    /// Validates `entries` and builds a table, assigning ids 1..=n
    ///
    /// Nothing is built unless every entry is valid.
    pub fn load(entries: &[WorkloadEntry], config: &SimConfig) -> Result<Self, SchedError> {
        if entries.is_empty() {
            return Err(WorkloadViolation::Empty.into());
        }
        if entries.len() > config.max_processes {
            return Err(WorkloadViolation::TooManyProcesses {
                count: entries.len(),
                max: config.max_processes,
            }
            .into());
        }
        for (index, entry) in entries.iter().enumerate() {
            entry.validate(index)?;
        }
        check_horizon(entries)?;

        let processes = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Process::new(
                    ProcessId::from_index(index),
                    entry.arrival_time as Ticks,
                    entry.burst_time as Ticks,
                    entry.priority.unwrap_or(0),
                )
            })
            .collect();

        Ok(Self { processes })
    }

    /// Returns the processes in load order
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    /// Looks up a process by id
    pub fn get(&self, id: ProcessId) -> Option<&Process> {
        self.processes.iter().find(|process| process.id == id)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Sum of all burst times
    pub fn total_burst(&self) -> Ticks {
        self.processes.iter().map(|process| process.burst_time).sum()
    }

    /// Clears run state on every process
    pub fn reset(&mut self) {
        for process in &mut self.processes {
            process.reset();
        }
    }

    /// Returns a reset copy, leaving `self` untouched
    pub fn fresh_copy(&self) -> Self {
        let mut copy = self.clone();
        copy.reset();
        copy
    }

    pub(crate) fn into_processes(self) -> Vec<Process> {
        self.processes
    }
}

/// Checks that the clock can never pass `Ticks::MAX`
///
/// No schedule ends later than the latest arrival plus the sum of all
/// bursts, so bounding that bounds every clock value a run produces.
fn check_horizon(entries: &[WorkloadEntry]) -> Result<(), WorkloadViolation> {
    let max_arrival = entries
        .iter()
        .map(|entry| entry.arrival_time)
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .try_fold(max_arrival as Ticks, |horizon, entry| {
            horizon.checked_add(entry.burst_time as Ticks)
        })
        .map(|_| ())
        .ok_or(WorkloadViolation::HorizonOverflow { max_arrival })
}
