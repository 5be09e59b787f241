//! Shortest job first, non-preemptive

use super::{run_to_completion_by, PolicyKind, SchedulingPolicy};
use crate::simulation::Simulation;

/// Runs the arrived process with the smallest burst to completion
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestJobFirst;

impl SchedulingPolicy for ShortestJobFirst {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Sjf
    }

    fn schedule(&self, sim: &mut Simulation) {
        run_to_completion_by(sim, |process| process.burst_time);
    }
}
