//! Shortest time to completion first (preemptive SJF)

use super::{PolicyKind, SchedulingPolicy};
use crate::simulation::Simulation;

/// Re-selects by smallest remaining time whenever a process arrives
///
/// Between arrivals the running process only gets shorter, so the
/// selection can only change at an arrival or a completion. The clock jumps
/// straight to the next of those instead of stepping tick by tick; the
/// timeline and events are the same as re-selecting every tick. A change of
/// selection is a preemption.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestTimeToCompletion;

impl SchedulingPolicy for ShortestTimeToCompletion {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Stcf
    }

    fn schedule(&self, sim: &mut Simulation) {
        while !sim.all_complete() {
            let next_arrival = sim.next_arrival();
            match sim.select_eligible(|process| process.remaining_time) {
                Some(index) => {
                    let remaining = sim.processes()[index].remaining_time;
                    let slice = match next_arrival {
                        Some(arrival) => remaining.min(arrival - sim.now()),
                        None => remaining,
                    };
                    sim.run(index, slice);
                }
                None => match next_arrival {
                    Some(arrival) => sim.idle_until(arrival),
                    None => break,
                },
            }
        }
    }
}
