//! Helpers shared by the unit tests

use crate::config::SimConfig;
use crate::result::RunResult;
use crate::workload::{ProcessTable, WorkloadEntry};
use core_types::{Process, ProcessId, Ticks};

/// Builds a table from `(arrival, burst)` pairs
pub fn table(pairs: &[(i64, i64)]) -> ProcessTable {
    let entries: Vec<WorkloadEntry> = pairs
        .iter()
        .map(|&(arrival, burst)| WorkloadEntry::new(arrival, burst))
        .collect();
    ProcessTable::load(&entries, &SimConfig::default()).unwrap()
}

/// Timeline as `(raw process id or None for idle, start, end)`
pub fn spans(result: &RunResult) -> Vec<(Option<u32>, Ticks, Ticks)> {
    result
        .timeline
        .iter()
        .map(|interval| {
            (
                interval.occupant.process().map(|id| id.as_u32()),
                interval.start,
                interval.end,
            )
        })
        .collect()
}

/// Completion times in load order
pub fn completions(result: &RunResult) -> Vec<Ticks> {
    result
        .processes
        .iter()
        .map(|process| process.completion_time.unwrap())
        .collect()
}

pub fn process(result: &RunResult, raw_id: u32) -> &Process {
    result.process(ProcessId::new(raw_id)).unwrap()
}
