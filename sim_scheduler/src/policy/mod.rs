//! Scheduling Policies
//!
//! Every policy implements [`SchedulingPolicy`] and drives a
//! [`Simulation`] until every process has finished.
//!
//! | Policy | Selection key        | Preemption        |
//! |--------|----------------------|-------------------|
//! | FIFO   | arrival time         | none              |
//! | SJF    | burst time           | none              |
//! | STCF   | remaining time       | every tick        |
//! | RR     | ready-queue order    | quantum expiry    |
//!
//! Ties on the selection key always go to the lowest process id.

mod fifo;
mod round_robin;
mod sjf;
mod stcf;

pub use fifo::Fifo;
pub use round_robin::RoundRobin;
pub use sjf::ShortestJobFirst;
pub use stcf::ShortestTimeToCompletion;

use crate::error::SchedError;
use crate::simulation::Simulation;
use core_types::{Process, Ticks};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which scheduling discipline produced a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Fifo,
    Sjf,
    Stcf,
    RoundRobin,
}

impl PolicyKind {
    /// All policies, in comparison order
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Fifo,
        PolicyKind::Sjf,
        PolicyKind::Stcf,
        PolicyKind::RoundRobin,
    ];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Sjf => "SJF",
            PolicyKind::Stcf => "STCF",
            PolicyKind::RoundRobin => "Round Robin",
        }
    }

    pub fn is_preemptive(&self) -> bool {
        matches!(self, PolicyKind::Stcf | PolicyKind::RoundRobin)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a policy name is not recognised
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown policy: {0}")]
pub struct ParsePolicyError(String);

impl FromStr for PolicyKind {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fifo" | "fcfs" => Ok(PolicyKind::Fifo),
            "sjf" => Ok(PolicyKind::Sjf),
            "stcf" | "srtf" => Ok(PolicyKind::Stcf),
            "rr" | "round-robin" | "round_robin" => Ok(PolicyKind::RoundRobin),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

/// A scheduling discipline
///
/// `schedule` must leave every process of the simulation complete. It may
/// only touch the simulation it is given.
pub trait SchedulingPolicy {
    fn kind(&self) -> PolicyKind;

    /// Time slice, for policies that have one
    fn quantum(&self) -> Option<Ticks> {
        None
    }

    fn schedule(&self, sim: &mut Simulation);
}

/// Builds the policy for `kind`
///
/// `quantum` is only read for round-robin.
pub fn build_policy(kind: PolicyKind, quantum: i64) -> Result<Box<dyn SchedulingPolicy>, SchedError> {
    Ok(match kind {
        PolicyKind::Fifo => Box::new(Fifo),
        PolicyKind::Sjf => Box::new(ShortestJobFirst),
        PolicyKind::Stcf => Box::new(ShortestTimeToCompletion),
        PolicyKind::RoundRobin => Box::new(RoundRobin::new(quantum)?),
    })
}

/// Non-preemptive dispatch loop shared by FIFO and SJF
///
/// At each decision point the eligible process with the smallest `key`
/// runs to completion. With nothing eligible the clock jumps to the next
/// arrival.
fn run_to_completion_by<K, F>(sim: &mut Simulation, key: F)
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    while !sim.all_complete() {
        match sim.select_eligible(&key) {
            Some(index) => {
                let remaining = sim.processes()[index].remaining_time;
                sim.run(index, remaining);
            }
            None => match sim.next_arrival() {
                Some(arrival) => sim.idle_until(arrival),
                None => break,
            },
        }
    }
}
