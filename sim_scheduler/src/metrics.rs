//! Metrics Calculator
//!
//! Fills in [`ProcessMetrics`] for every process of a finished run and
//! averages them. All per-process values are integer ticks, so
//! `turnaround == waiting + burst` holds exactly.

use crate::error::{MissingField, SchedError};
use core_types::{Process, ProcessMetrics};
use serde::{Deserialize, Serialize};

/// Arithmetic means over all processes of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    pub turnaround_time: f64,
    pub waiting_time: f64,
    pub response_time: f64,
}

/// Computes the metrics of one finished process
pub fn process_metrics(process: &Process) -> Result<ProcessMetrics, SchedError> {
    let completion = process
        .completion_time
        .ok_or(SchedError::IncompleteRun {
            process: process.id,
            missing: MissingField::CompletionTime,
        })?;
    let first_run = process.first_run_time.ok_or(SchedError::IncompleteRun {
        process: process.id,
        missing: MissingField::FirstRunTime,
    })?;

    debug_assert!(completion >= process.arrival_time + process.burst_time);
    debug_assert!(first_run >= process.arrival_time);

    let turnaround_time = completion.saturating_sub(process.arrival_time);
    Ok(ProcessMetrics {
        turnaround_time,
        waiting_time: turnaround_time.saturating_sub(process.burst_time),
        response_time: first_run.saturating_sub(process.arrival_time),
    })
}

/// Computes and stores metrics for every process, then averages them
///
/// Either every process gets its metrics or none does.
pub fn compute_metrics(processes: &mut [Process]) -> Result<AverageMetrics, SchedError> {
    let metrics = processes
        .iter()
        .map(process_metrics)
        .collect::<Result<Vec<_>, _>>()?;

    for (process, computed) in processes.iter_mut().zip(&metrics) {
        process.metrics = Some(*computed);
    }

    Ok(average(&metrics))
}

fn average(metrics: &[ProcessMetrics]) -> AverageMetrics {
    if metrics.is_empty() {
        return AverageMetrics::default();
    }
    let count = metrics.len() as f64;
    let sum = |field: fn(&ProcessMetrics) -> u64| {
        metrics.iter().map(|m| field(m) as u128).sum::<u128>() as f64
    };

    AverageMetrics {
        turnaround_time: sum(|m| m.turnaround_time) / count,
        waiting_time: sum(|m| m.waiting_time) / count,
        response_time: sum(|m| m.response_time) / count,
    }
}
