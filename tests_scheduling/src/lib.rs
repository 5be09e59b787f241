//! Scheduling Test Utilities
//!
//! Shared fixtures for the cross-policy property tests.
//!
//! ## Test Philosophy
//!
//! - **Every property, every policy**: invariants are checked against all
//!   four policies, not just the one they are most obviously about
//! - **Deterministic inputs**: generated workloads come from a fixed seed so
//!   failures are reproducible
//! - **Hand-checked anchors**: a few small workloads have expected values
//!   worked out by hand

use core_types::Ticks;
use sim_scheduler::{
    compare_all, ProcessTable, RunResult, SchedError, SimConfig, WorkloadEntry,
};

/// Quantum used when a test does not care about it
pub const TEST_QUANTUM: i64 = 3;

/// Four processes with staggered arrivals, used throughout the docs
pub fn canonical_workload() -> Vec<WorkloadEntry> {
    pairs(&[(0, 5), (1, 3), (2, 8), (3, 6)])
}

/// Builds workload entries from `(arrival, burst)` pairs
pub fn pairs(pairs: &[(i64, i64)]) -> Vec<WorkloadEntry> {
    pairs
        .iter()
        .map(|&(arrival, burst)| WorkloadEntry::new(arrival, burst))
        .collect()
}

pub fn table_from(entries: &[WorkloadEntry]) -> Result<ProcessTable, SchedError> {
    ProcessTable::load(entries, &SimConfig::default())
}

/// Runs every policy over `table`
pub fn run_all(table: &ProcessTable, quantum: i64) -> Result<Vec<RunResult>, SchedError> {
    compare_all(table, quantum)
}

/// Small deterministic xorshift generator
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    state: u64,
}

impl WorkloadGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Value in `low..=high`
    fn next_in(&mut self, low: i64, high: i64) -> i64 {
        let span = (high - low + 1) as u64;
        low + (self.next_u64() % span) as i64
    }

    /// Workload of `len` processes with arrivals in `0..=max_arrival`
    pub fn workload(&mut self, len: usize, max_arrival: i64, max_burst: i64) -> Vec<WorkloadEntry> {
        (0..len)
            .map(|_| {
                WorkloadEntry::new(self.next_in(0, max_arrival), self.next_in(1, max_burst))
            })
            .collect()
    }
}

/// A fixed mix of hand-written and generated workloads
///
/// Covers simultaneous arrivals, gaps where the CPU idles, equal bursts and
/// single-process tables.
pub fn workload_corpus() -> Vec<Vec<WorkloadEntry>> {
    let mut corpus = vec![
        canonical_workload(),
        pairs(&[(0, 5)]),
        pairs(&[(5, 3)]),
        pairs(&[(0, 4), (0, 4), (0, 4)]),
        pairs(&[(0, 2), (10, 3), (10, 1), (20, 4)]),
        pairs(&[(3, 1), (0, 9), (1, 1), (2, 1)]),
        pairs(&[(0, 10), (1, 1), (2, 1), (3, 1), (4, 1)]),
    ];

    let mut generator = WorkloadGenerator::new(0x5eed);
    for len in 1..=12 {
        corpus.push(generator.workload(len, 20, 10));
    }
    corpus
}

/// Workloads whose arrivals are non-decreasing in load order
pub fn sorted_corpus() -> Vec<Vec<WorkloadEntry>> {
    workload_corpus()
        .into_iter()
        .map(|mut workload| {
            workload.sort_by_key(|entry| entry.arrival_time);
            workload
        })
        .collect()
}

/// Corpus with every workload's arrivals moved to time 0
pub fn simultaneous_corpus() -> Vec<Vec<WorkloadEntry>> {
    workload_corpus()
        .into_iter()
        .map(|workload| {
            workload
                .into_iter()
                .map(|entry| WorkloadEntry::new(0, entry.burst_time))
                .collect()
        })
        .collect()
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
