//! Round-robin with a fixed quantum

use super::{PolicyKind, SchedulingPolicy};
use crate::error::SchedError;
use crate::simulation::Simulation;
use core_types::Ticks;
use std::collections::VecDeque;

/// FIFO ready queue, each dispatch runs for at most one quantum
///
/// Processes that arrive while another one runs join the queue, in id
/// order, ahead of the process whose quantum just expired.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: Ticks,
}

impl RoundRobin {
    /// Creates a round-robin policy
    ///
    /// Fails with `InvalidQuantum` unless `quantum` is positive.
    pub fn new(quantum: i64) -> Result<Self, SchedError> {
        if quantum <= 0 {
            return Err(SchedError::InvalidQuantum(quantum));
        }
        Ok(Self {
            quantum: quantum as Ticks,
        })
    }

    pub fn quantum_ticks(&self) -> Ticks {
        self.quantum
    }
}

impl SchedulingPolicy for RoundRobin {
    fn kind(&self) -> PolicyKind {
        PolicyKind::RoundRobin
    }

    fn quantum(&self) -> Option<Ticks> {
        Some(self.quantum)
    }

    fn schedule(&self, sim: &mut Simulation) {
        let mut ready = ReadyQueue::new(sim.processes().len());
        ready.admit_arrivals(sim);

        while !sim.all_complete() {
            let Some(index) = ready.pop() else {
                match sim.next_arrival() {
                    Some(arrival) => {
                        sim.idle_until(arrival);
                        ready.admit_arrivals(sim);
                        continue;
                    }
                    None => break,
                }
            };

            let slice = sim.processes()[index].remaining_time.min(self.quantum);
            let finished = sim.run(index, slice);

            ready.admit_arrivals(sim);
            if !finished {
                ready.push(index);
            }
        }
    }
}

/// Ready queue that admits each process exactly once
#[derive(Debug)]
struct ReadyQueue {
    queue: VecDeque<usize>,
    admitted: Vec<bool>,
}

impl ReadyQueue {
    fn new(len: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(len),
            admitted: vec![false; len],
        }
    }

    /// Enqueues every not-yet-admitted process that has arrived, in id order
    fn admit_arrivals(&mut self, sim: &Simulation) {
        for (index, process) in sim.processes().iter().enumerate() {
            if !self.admitted[index] && process.has_arrived(sim.now()) {
                self.admitted[index] = true;
                self.queue.push_back(index);
            }
        }
    }

    fn pop(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }

    fn push(&mut self, index: usize) {
        self.queue.push_back(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::ScheduleEvent;
    use crate::test_utils::{completions, process, spans, table};

    #[test]
    fn test_round_robin_rejects_non_positive_quantum() {
        assert_eq!(RoundRobin::new(0).err(), Some(SchedError::InvalidQuantum(0)));
        assert_eq!(
            RoundRobin::new(-3).err(),
            Some(SchedError::InvalidQuantum(-3))
        );
        assert_eq!(RoundRobin::new(4).unwrap().quantum_ticks(), 4);
    }

    #[test]
    fn test_round_robin_rotates_queue() {
        let table = table(&[(0, 5), (1, 3), (2, 8), (3, 6)]);
        let result = crate::run_policy(&table, &RoundRobin::new(3).unwrap()).unwrap();

        assert_eq!(
            spans(&result),
            vec![
                (Some(1), 0, 3),
                (Some(2), 3, 6),
                (Some(3), 6, 9),
                (Some(4), 9, 12),
                (Some(1), 12, 14),
                (Some(3), 14, 17),
                (Some(4), 17, 20),
                (Some(3), 20, 22)
            ]
        );
        assert_eq!(completions(&result), vec![14, 6, 22, 20]);
        assert_eq!(result.averages.turnaround_time, 14.0);
        assert_eq!(result.averages.waiting_time, 8.5);
        assert_eq!(result.averages.response_time, 3.0);
    }

    #[test]
    fn test_round_robin_new_arrivals_queue_ahead_of_expired_process() {
        // P2 arrives during P1's first quantum and must run before P1 resumes
        let table = table(&[(0, 4), (1, 2)]);
        let result = crate::run_policy(&table, &RoundRobin::new(2).unwrap()).unwrap();

        assert_eq!(
            spans(&result),
            vec![(Some(1), 0, 2), (Some(2), 2, 4), (Some(1), 4, 6)]
        );
    }

    #[test]
    fn test_round_robin_simultaneous_arrivals_enqueue_in_id_order() {
        let table = table(&[(0, 3), (2, 1), (1, 1)]);
        let result = crate::run_policy(&table, &RoundRobin::new(3).unwrap()).unwrap();

        // P3 and P2 both arrive inside P1's quantum; P2 has the lower id
        assert_eq!(
            spans(&result),
            vec![(Some(1), 0, 3), (Some(2), 3, 4), (Some(3), 4, 5)]
        );
    }

    #[test]
    fn test_round_robin_lone_process_merges_quanta() {
        let table = table(&[(0, 7)]);
        let result = crate::run_policy(&table, &RoundRobin::new(2).unwrap()).unwrap();

        assert_eq!(spans(&result), vec![(Some(1), 0, 7)]);
        assert!(!result
            .events
            .has_event(|e| matches!(e, ScheduleEvent::Preempted { .. })));
    }

    #[test]
    fn test_round_robin_idles_when_queue_drains() {
        let table = table(&[(0, 2), (5, 2), (5, 1)]);
        let result = crate::run_policy(&table, &RoundRobin::new(4).unwrap()).unwrap();

        assert_eq!(
            spans(&result),
            vec![(Some(1), 0, 2), (None, 2, 5), (Some(2), 5, 7), (Some(3), 7, 8)]
        );
        assert_eq!(process(&result, 3).metrics.unwrap().response_time, 2);
    }

    #[test]
    fn test_round_robin_expired_quantum_preempts() {
        let table = table(&[(0, 4), (0, 4)]);
        let result = crate::run_policy(&table, &RoundRobin::new(2).unwrap()).unwrap();

        assert_eq!(
            result
                .events
                .count_events(|e| matches!(e, ScheduleEvent::Preempted { .. })),
            2
        );
    }
}
