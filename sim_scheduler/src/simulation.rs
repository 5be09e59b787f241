//! Simulation state for a single policy run
//!
//! A [`Simulation`] owns a reset copy of the process table, the logical
//! clock, the timeline and the audit trail. Policies only decide *which*
//! process runs and for how long; the bookkeeping that every policy needs
//! (first-run marking, completion, idle accounting, preemption events)
//! lives here so it is done the same way for all of them.

use crate::audit::{ScheduleAuditLog, ScheduleEvent};
use crate::error::SchedError;
use crate::metrics::compute_metrics;
use crate::policy::PolicyKind;
use crate::result::RunResult;
use crate::timeline::{Occupant, Timeline};
use crate::workload::ProcessTable;
use core_types::{Process, Ticks};

/// Simulation state for one run
#[derive(Debug)]
pub struct Simulation {
    now: Ticks,
    processes: Vec<Process>,
    timeline: Timeline,
    audit_log: ScheduleAuditLog,
    /// Index of the process that held the CPU last, if it still has work
    current: Option<usize>,
    completed: usize,
}

impl Simulation {
    /// Starts a run at time 0 over a reset copy of `table`
    pub fn new(table: &ProcessTable) -> Self {
        Self {
            now: 0,
            processes: table.fresh_copy().into_processes(),
            timeline: Timeline::new(),
            audit_log: ScheduleAuditLog::new(),
            current: None,
            completed: 0,
        }
    }

    /// Current simulated time
    pub fn now(&self) -> Ticks {
        self.now
    }

    /// Processes in load order
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn all_complete(&self) -> bool {
        self.completed == self.processes.len()
    }

    /// Picks the eligible process with the smallest `key`
    ///
    /// Ties go to the lowest id, which is the lowest index since the table
    /// is in load order.
    pub fn select_eligible<K, F>(&self, key: F) -> Option<usize>
    where
        K: Ord,
        F: Fn(&Process) -> K,
    {
        self.processes
            .iter()
            .enumerate()
            .filter(|(_, process)| process.is_eligible(self.now))
            .min_by_key(|&(_, process)| (key(process), process.id))
            .map(|(index, _)| index)
    }

    /// Earliest arrival still in the future among unfinished processes
    pub fn next_arrival(&self) -> Option<Ticks> {
        self.processes
            .iter()
            .filter(|process| !process.is_complete() && process.arrival_time > self.now)
            .map(|process| process.arrival_time)
            .min()
    }

    /// Leaves the CPU idle until `until`
    pub fn idle_until(&mut self, until: Ticks) {
        if until <= self.now {
            return;
        }
        self.timeline.record(Occupant::Idle, self.now, until);
        self.audit_log.record(ScheduleEvent::CpuIdle {
            from: self.now,
            until,
        });
        self.current = None;
        self.now = until;
    }

    /// Runs the process at `index` for `ticks` and advances the clock
    ///
    /// Returns true if the process finished.
    pub fn run(&mut self, index: usize, ticks: Ticks) -> bool {
        let start = self.now;
        let end = start + ticks;

        if self.current != Some(index) {
            if let Some(previous) = self.current {
                let preempted = &self.processes[previous];
                self.audit_log.record(ScheduleEvent::Preempted {
                    process: preempted.id,
                    at: start,
                    remaining: preempted.remaining_time,
                });
            }
            let process = &self.processes[index];
            self.audit_log.record(ScheduleEvent::Dispatched {
                process: process.id,
                at: start,
                remaining: process.remaining_time,
            });
            self.current = Some(index);
        }

        let process = &mut self.processes[index];
        process.mark_dispatched(start);
        let finished = process.execute(ticks, end);
        let id = process.id;

        self.timeline.record(Occupant::Process(id), start, end);
        self.now = end;

        if finished {
            self.audit_log
                .record(ScheduleEvent::Completed { process: id, at: end });
            self.completed += 1;
            self.current = None;
        }
        finished
    }

    /// Ends the run, computing metrics
    pub fn finish(
        mut self,
        policy: PolicyKind,
        quantum: Option<Ticks>,
    ) -> Result<RunResult, SchedError> {
        let averages = compute_metrics(&mut self.processes)?;
        Ok(RunResult {
            policy,
            quantum,
            processes: self.processes,
            timeline: self.timeline,
            averages,
            events: self.audit_log,
        })
    }
}
