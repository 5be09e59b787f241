//! Identifiers and time units for simulated processes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical simulation time, in abstract ticks
pub type Ticks = u64;

/// Identifier for a simulated process
///
/// Ids are positive and assigned in workload order, which is not
/// necessarily arrival order. Ordering on ids is the tie-break used by
/// every scheduling policy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ProcessId(u32);

impl ProcessId {
    /// Creates a process ID from its raw value
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the id for the process at `index` (zero-based) in load order
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Returns the raw id value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}
