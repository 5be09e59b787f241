//! Error types for the scheduling engine

use core_types::ProcessId;
use std::fmt;
use thiserror::Error;

/// Reason a workload was rejected by the loader
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkloadViolation {
    #[error("workload is empty")]
    Empty,

    #[error("{count} processes exceeds the maximum of {max}")]
    TooManyProcesses { count: usize, max: usize },

    #[error("entry {index} has negative arrival time {arrival}")]
    NegativeArrival { index: usize, arrival: i64 },

    #[error("entry {index} has non-positive burst time {burst}")]
    NonPositiveBurst { index: usize, burst: i64 },

    #[error("latest arrival {max_arrival} plus total burst does not fit in the clock range")]
    HorizonOverflow { max_arrival: i64 },
}

/// Run-state field a policy failed to fill in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    CompletionTime,
    FirstRunTime,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingField::CompletionTime => write!(f, "completion time"),
            MissingField::FirstRunTime => write!(f, "first-run time"),
        }
    }
}

/// Scheduling engine errors
///
/// `InvalidWorkload` and `InvalidQuantum` are raised before any simulation
/// starts. `IncompleteRun` means a policy broke its contract and is not
/// recoverable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchedError {
    #[error("Invalid workload: {0}")]
    InvalidWorkload(#[from] WorkloadViolation),

    #[error("Invalid quantum: {0} (must be a positive integer)")]
    InvalidQuantum(i64),

    #[error("Incomplete run: {process} has no {missing}")]
    IncompleteRun {
        process: ProcessId,
        missing: MissingField,
    },
}
