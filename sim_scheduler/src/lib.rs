//! # Scheduling Simulator
//!
//! This crate replays a fixed workload of processes through a CPU
//! scheduling policy and reports what happened.
//!
//! ## Philosophy
//!
//! - **Determinism first**: Same workload + same policy => same result, byte
//!   for byte.
//! - **Logical time only**: The clock is a tick counter starting at 0. There
//!   are no threads, no sleeps and no real I/O.
//! - **Runs never share state**: Every run works on its own reset copy of the
//!   process table and builds its own timeline.
//! - **Validate before simulating**: Bad workloads and quanta are rejected
//!   before the first tick.
//!
//! ## Policies
//!
//! - [`Fifo`]: first come, first served
//! - [`ShortestJobFirst`]: non-preemptive, smallest burst
//! - [`ShortestTimeToCompletion`]: preemptive, smallest remaining time
//! - [`RoundRobin`]: fixed quantum, FIFO ready queue
//!
//! ## Example
//!
//! ```
//! use sim_scheduler::{run_round_robin, ProcessTable, SimConfig, WorkloadEntry};
//!
//! let workload = vec![WorkloadEntry::new(0, 5), WorkloadEntry::new(1, 3)];
//! let table = ProcessTable::load(&workload, &SimConfig::default()).unwrap();
//!
//! let result = run_round_robin(&table, 2).unwrap();
//! assert_eq!(result.makespan(), 8);
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod metrics;
pub mod policy;
pub mod result;
pub mod simulation;
pub mod timeline;
pub mod workload;

#[cfg(test)]
mod test_utils;

pub use audit::{ScheduleAuditLog, ScheduleEvent};
pub use config::{SimConfig, DEFAULT_MAX_PROCESSES, DEFAULT_QUANTUM};
pub use error::{MissingField, SchedError, WorkloadViolation};
pub use metrics::{compute_metrics, process_metrics, AverageMetrics};
pub use policy::{
    build_policy, Fifo, ParsePolicyError, PolicyKind, RoundRobin, SchedulingPolicy,
    ShortestJobFirst, ShortestTimeToCompletion,
};
pub use result::RunResult;
pub use simulation::Simulation;
pub use timeline::{Occupant, Timeline, TimelineInterval};
pub use workload::{ProcessTable, WorkloadEntry};

/// Runs `policy` over a reset copy of `table`
///
/// `table` itself is never modified.
pub fn run_policy(
    table: &ProcessTable,
    policy: &dyn SchedulingPolicy,
) -> Result<RunResult, SchedError> {
    let mut sim = Simulation::new(table);
    policy.schedule(&mut sim);
    sim.finish(policy.kind(), policy.quantum())
}

/// First come, first served
pub fn run_fifo(table: &ProcessTable) -> Result<RunResult, SchedError> {
    run_policy(table, &Fifo)
}

/// Shortest job first, non-preemptive
pub fn run_sjf(table: &ProcessTable) -> Result<RunResult, SchedError> {
    run_policy(table, &ShortestJobFirst)
}

/// Shortest time to completion first, preemptive
pub fn run_stcf(table: &ProcessTable) -> Result<RunResult, SchedError> {
    run_policy(table, &ShortestTimeToCompletion)
}

/// Round-robin with the given quantum
///
/// Fails with `InvalidQuantum` before simulating if `quantum <= 0`.
pub fn run_round_robin(table: &ProcessTable, quantum: i64) -> Result<RunResult, SchedError> {
    let policy = RoundRobin::new(quantum)?;
    run_policy(table, &policy)
}

/// Runs every policy in [`PolicyKind::ALL`] order
///
/// The quantum is validated before any policy runs.
pub fn compare_all(table: &ProcessTable, quantum: i64) -> Result<Vec<RunResult>, SchedError> {
    let policies = PolicyKind::ALL
        .iter()
        .map(|&kind| build_policy(kind, quantum))
        .collect::<Result<Vec<_>, _>>()?;

    policies
        .iter()
        .map(|policy| run_policy(table, policy.as_ref()))
        .collect()
}
