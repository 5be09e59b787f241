//! Timeline Conservation Tests
//!
//! The timeline must account for every tick exactly once: each process gets
//! exactly its burst, nothing runs before it arrives, and there are no gaps.

use sim_scheduler::{Occupant, ScheduleEvent};
use tests_scheduling::{run_all, table_from, workload_corpus, TEST_QUANTUM};

#[test]
fn test_busy_time_equals_burst() {
    for workload in workload_corpus() {
        let table = table_from(&workload).unwrap();
        for result in run_all(&table, TEST_QUANTUM).unwrap() {
            for process in &result.processes {
                assert_eq!(
                    result.timeline.busy_time_of(process.id),
                    process.burst_time,
                    "{} {} in {:?}",
                    result.label(),
                    process.id,
                    workload
                );
                assert_eq!(process.remaining_time, 0);
            }
        }
    }
}

#[test]
fn test_timeline_is_contiguous_from_zero() {
    for workload in workload_corpus() {
        let table = table_from(&workload).unwrap();
        for result in run_all(&table, TEST_QUANTUM).unwrap() {
            let intervals = result.timeline.intervals();
            assert_eq!(intervals[0].start, 0);
            for pair in intervals.windows(2) {
                assert_eq!(pair[0].end, pair[1].start, "{}", result.label());
                assert_ne!(pair[0].occupant, pair[1].occupant, "unmerged neighbours");
            }
            assert!(intervals.iter().all(|interval| interval.start < interval.end));

            let busy: u64 = table.iter().map(|p| p.burst_time).sum();
            assert_eq!(busy + result.timeline.idle_time(), result.makespan());
        }
    }
}

#[test]
fn test_no_process_runs_before_arrival() {
    for workload in workload_corpus() {
        let table = table_from(&workload).unwrap();
        for result in run_all(&table, TEST_QUANTUM).unwrap() {
            for process in &result.processes {
                let first_run = process.first_run_time.unwrap();
                assert!(first_run >= process.arrival_time);
                assert!(result
                    .timeline
                    .intervals_for(process.id)
                    .all(|interval| interval.start >= process.arrival_time));

                let first_interval = result.timeline.intervals_for(process.id).next().unwrap();
                assert_eq!(first_interval.start, first_run);
            }
        }
    }
}

#[test]
fn test_completion_matches_last_interval() {
    for workload in workload_corpus() {
        let table = table_from(&workload).unwrap();
        for result in run_all(&table, TEST_QUANTUM).unwrap() {
            for process in &result.processes {
                let last = result.timeline.intervals_for(process.id).last().unwrap();
                assert_eq!(process.completion_time, Some(last.end));
            }
        }
    }
}

#[test]
fn test_cpu_idles_only_when_nothing_has_arrived() {
    for workload in workload_corpus() {
        let table = table_from(&workload).unwrap();
        for result in run_all(&table, TEST_QUANTUM).unwrap() {
            for interval in result.timeline.iter() {
                if interval.occupant != Occupant::Idle {
                    continue;
                }
                let waiting = result.processes.iter().any(|p| {
                    p.arrival_time <= interval.start && p.completion_time.unwrap() > interval.start
                });
                assert!(!waiting, "{} idles at {}", result.label(), interval.start);
            }
        }
    }
}

#[test]
fn test_events_complete_each_process_once() {
    for workload in workload_corpus() {
        let table = table_from(&workload).unwrap();
        for result in run_all(&table, TEST_QUANTUM).unwrap() {
            for process in &result.processes {
                let completions = result.events.count_events(|e| {
                    matches!(e, ScheduleEvent::Completed { process: id, .. } if *id == process.id)
                });
                assert_eq!(completions, 1);
            }
            let timestamps: Vec<u64> = result.events.events().iter().map(|e| e.timestamp()).collect();
            assert!(timestamps.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }
}
