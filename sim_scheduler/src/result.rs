//! Run Result

use crate::audit::ScheduleAuditLog;
use crate::metrics::AverageMetrics;
use crate::policy::PolicyKind;
use crate::timeline::Timeline;
use core_types::{Process, ProcessId, Ticks};
use serde::{Deserialize, Serialize};

/// Output of one policy execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Policy that produced this result
    pub policy: PolicyKind,
    /// Quantum, for round-robin runs
    pub quantum: Option<Ticks>,
    /// Processes in load order with run state and metrics filled in
    pub processes: Vec<Process>,
    /// Merged execution intervals
    pub timeline: Timeline,
    /// Means over all processes
    pub averages: AverageMetrics,
    /// Dispatcher events in order
    pub events: ScheduleAuditLog,
}

impl RunResult {
    /// Looks up a process by id
    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.processes.iter().find(|process| process.id == id)
    }

    /// Time at which the last process finished
    pub fn makespan(&self) -> Ticks {
        self.timeline.end_time()
    }

    /// Fraction of the makespan the CPU was busy, in `[0, 1]`
    pub fn cpu_utilization(&self) -> f64 {
        let makespan = self.makespan();
        if makespan == 0 {
            return 0.0;
        }
        (makespan - self.timeline.idle_time()) as f64 / makespan as f64
    }

    /// Label such as `FIFO` or `Round Robin (q=3)`
    pub fn label(&self) -> String {
        match self.quantum {
            Some(quantum) => format!("{} (q={})", self.policy.name(), quantum),
            None => self.policy.name().to_string(),
        }
    }
}
