//! Simulation configuration

use core_types::Ticks;

/// Default cap on the number of processes in one workload
pub const DEFAULT_MAX_PROCESSES: usize = 100;

/// Default round-robin quantum when the caller does not choose one
pub const DEFAULT_QUANTUM: Ticks = 3;

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Largest workload the loader accepts
    pub max_processes: usize,
    /// Quantum used by hosts that do not pass one explicitly
    pub default_quantum: Ticks,
}

impl SimConfig {
    /// Sets the process cap
    pub fn with_max_processes(mut self, max_processes: usize) -> Self {
        self.max_processes = max_processes;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_processes: DEFAULT_MAX_PROCESSES,
            default_quantum: DEFAULT_QUANTUM,
        }
    }
}
