//! First-come-first-served

use super::{run_to_completion_by, PolicyKind, SchedulingPolicy};
use crate::simulation::Simulation;

/// Runs processes to completion in arrival order
///
/// Equal arrivals keep load order, which is the same as sorting the table
/// stably by arrival time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fifo;

impl SchedulingPolicy for Fifo {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn schedule(&self, sim: &mut Simulation) {
        run_to_completion_by(sim, |process| process.arrival_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{completions, process, spans, table};

    #[test]
    fn test_fifo_runs_in_arrival_order() {
        let table = table(&[(0, 5), (1, 3), (2, 8), (3, 6)]);
        let result = crate::run_policy(&table, &Fifo).unwrap();

        assert_eq!(completions(&result), vec![5, 8, 16, 22]);
        assert_eq!(result.averages.turnaround_time, 11.25);
        assert_eq!(result.averages.waiting_time, 5.0);
        assert_eq!(result.averages.response_time, 5.0);
    }

    #[test]
    fn test_fifo_sorts_unordered_workload_stably() {
        // P3 and P1 both arrive at 0; load order wins
        let table = table(&[(0, 2), (4, 1), (0, 3)]);
        let result = crate::run_policy(&table, &Fifo).unwrap();

        assert_eq!(
            spans(&result),
            vec![(Some(1), 0, 2), (Some(3), 2, 5), (Some(2), 5, 6)]
        );
    }

    #[test]
    fn test_fifo_idles_until_next_arrival() {
        let table = table(&[(0, 2), (6, 1)]);
        let result = crate::run_policy(&table, &Fifo).unwrap();

        assert_eq!(
            spans(&result),
            vec![(Some(1), 0, 2), (None, 2, 6), (Some(2), 6, 7)]
        );
        assert_eq!(process(&result, 2).metrics.unwrap().response_time, 0);
    }
}
