//! # Report Renderer
//!
//! Turns [`RunResult`]s into plain-text reports.
//!
//! ## Philosophy
//!
//! - **Rendering is a host concern**: the simulator never prints, it returns
//!   results and this crate formats them
//! - **Renderer is dumb and replaceable**: no scheduling logic lives here
//! - **Plain text only**: no ANSI, no cursor addressing, no terminal state
//!
//! A single-run report contains, in order:
//!
//! ```text
//! === FIFO Scheduling Results ===
//! PID  Arrival  Burst  Complete  TAT    WT     RT
//! -----------------------------------------------------
//! P1   0        5      5         5      0      0
//! ...
//!
//! Average Turnaround Time: 11.25
//! Average Waiting Time:    5.00
//! Average Response Time:   5.00
//!
//! === Gantt Chart ===
//! |-----P1-----|---P2---|...
//! 0            5        8 ...
//! ```

use sim_scheduler::{
    AverageMetrics, Occupant, RunResult, ScheduleAuditLog, ScheduleEvent, Timeline,
};

/// Width of the rule under table headers
const SEPARATOR_WIDTH: usize = 53;

/// Upper bound on fill characters drawn on each side of a Gantt label
const MAX_SEGMENT_WIDTH: usize = 60;

const BUSY_FILL: char = '-';
const IDLE_FILL: char = '.';
const IDLE_LABEL: &str = "IDLE";

/// Rendering knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fill characters drawn per tick on each side of a Gantt label
    pub gantt_scale: usize,
    /// Append the dispatcher trace to single-run reports
    pub show_trace: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gantt_scale: 1,
            show_trace: false,
        }
    }
}

/// Text renderer for simulation results
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    options: RenderOptions,
}

impl ReportRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Full report for one run
    pub fn render_run(&self, result: &RunResult) -> String {
        let mut output = String::new();
        output.push_str(&format!("=== {} Scheduling Results ===\n", result.label()));
        output.push_str(&self.render_process_table(result));
        output.push('\n');
        output.push_str(&self.render_averages(&result.averages));
        output.push_str(&format!(
            "CPU Utilization:         {:.2}%\n",
            result.cpu_utilization() * 100.0
        ));
        output.push('\n');
        output.push_str(&self.render_gantt(&result.timeline));

        if self.options.show_trace {
            output.push('\n');
            output.push_str(&self.render_trace(&result.events));
        }
        output
    }

    /// Per-process table in load order
    ///
    /// Metrics that are missing render as `-`.
    pub fn render_process_table(&self, result: &RunResult) -> String {
        let mut output = format!(
            "{:<4} {:<8} {:<6} {:<9} {:<6} {:<6} {:<6}\n",
            "PID", "Arrival", "Burst", "Complete", "TAT", "WT", "RT"
        );
        output.push_str(&"-".repeat(SEPARATOR_WIDTH));
        output.push('\n');

        for process in &result.processes {
            let completion = optional(process.completion_time);
            let (turnaround, waiting, response) = match process.metrics {
                Some(metrics) => (
                    metrics.turnaround_time.to_string(),
                    metrics.waiting_time.to_string(),
                    metrics.response_time.to_string(),
                ),
                None => ("-".to_string(), "-".to_string(), "-".to_string()),
            };
            output.push_str(&format!(
                "{:<4} {:<8} {:<6} {:<9} {:<6} {:<6} {:<6}\n",
                process.id.to_string(),
                process.arrival_time,
                process.burst_time,
                completion,
                turnaround,
                waiting,
                response
            ));
        }
        output
    }

    pub fn render_averages(&self, averages: &AverageMetrics) -> String {
        format!(
            "Average Turnaround Time: {:.2}\n\
             Average Waiting Time:    {:.2}\n\
             Average Response Time:   {:.2}\n",
            averages.turnaround_time, averages.waiting_time, averages.response_time
        )
    }

    /// Gantt chart with a bar line and a time-marker line
    ///
    /// Each interval is drawn as `|` followed by `duration * gantt_scale`
    /// fill characters on both sides of its label, capped at
    /// `MAX_SEGMENT_WIDTH`. Markers always show the real times and are placed
    /// under the `|` they belong to, shifted right only when the previous
    /// marker would otherwise touch them.
    pub fn render_gantt(&self, timeline: &Timeline) -> String {
        let mut output = String::from("=== Gantt Chart ===\n");
        let Some(first) = timeline.intervals().first() else {
            output.push_str("(empty timeline)\n");
            return output;
        };

        let mut bar = String::new();
        let mut boundaries = vec![(0usize, first.start)];

        for interval in timeline.iter() {
            let (fill, label) = match interval.occupant {
                Occupant::Idle => (IDLE_FILL, IDLE_LABEL.to_string()),
                Occupant::Process(id) => (BUSY_FILL, id.to_string()),
            };
            let width = self.segment_width(interval.duration());
            let padding: String = std::iter::repeat(fill).take(width).collect();

            bar.push('|');
            bar.push_str(&padding);
            bar.push_str(&label);
            bar.push_str(&padding);
            boundaries.push((bar.chars().count(), interval.end));
        }
        bar.push('|');

        let mut markers = String::new();
        for (column, time) in boundaries {
            let used = markers.chars().count();
            if used < column {
                markers.push_str(&" ".repeat(column - used));
            } else if used > 0 {
                markers.push(' ');
            }
            markers.push_str(&time.to_string());
        }

        output.push_str(&bar);
        output.push('\n');
        output.push_str(&markers);
        output.push('\n');
        output
    }

    fn segment_width(&self, duration: u64) -> usize {
        usize::try_from(duration)
            .unwrap_or(usize::MAX)
            .saturating_mul(self.options.gantt_scale)
            .min(MAX_SEGMENT_WIDTH)
    }

    /// Dispatcher trace, one row per event
    pub fn render_trace(&self, events: &ScheduleAuditLog) -> String {
        let mut output = String::from("=== Execution Trace ===\n");
        output.push_str(&format!(
            "{:>4} | {:<7} | {:<9} | {}\n",
            "Time", "Process", "Remaining", "Action"
        ));
        output.push_str(&"-".repeat(SEPARATOR_WIDTH));
        output.push('\n');

        for event in events.events() {
            let (process, remaining, action) = match event {
                ScheduleEvent::Dispatched { process, remaining, .. } => {
                    (process.to_string(), remaining.to_string(), "Dispatch".to_string())
                }
                ScheduleEvent::Preempted { process, remaining, .. } => {
                    (process.to_string(), remaining.to_string(), "Preempt".to_string())
                }
                ScheduleEvent::Completed { process, .. } => {
                    (process.to_string(), "0".to_string(), "Complete".to_string())
                }
                ScheduleEvent::CpuIdle { until, .. } => (
                    IDLE_LABEL.to_string(),
                    "-".to_string(),
                    format!("CPU Idle until {}", until),
                ),
            };
            output.push_str(&format!(
                "{:>4} | {:<7} | {:<9} | {}\n",
                event.timestamp(),
                process,
                remaining,
                action
            ));
        }
        output
    }

    /// Side-by-side averages for several runs
    pub fn render_comparison(&self, results: &[RunResult]) -> String {
        let mut output = String::from("=== Policy Comparison ===\n");
        output.push_str(&format!(
            "{:<20} {:>8} {:>8} {:>8} {:>9}\n",
            "Policy", "Avg TAT", "Avg WT", "Avg RT", "Makespan"
        ));
        output.push_str(&"-".repeat(SEPARATOR_WIDTH + 5));
        output.push('\n');

        for result in results {
            output.push_str(&format!(
                "{:<20} {:>8.2} {:>8.2} {:>8.2} {:>9}\n",
                result.label(),
                result.averages.turnaround_time,
                result.averages.waiting_time,
                result.averages.response_time,
                result.makespan()
            ));
        }

        if let Some(best) = results.iter().min_by(|a, b| {
            a.averages
                .turnaround_time
                .total_cmp(&b.averages.turnaround_time)
        }) {
            output.push_str(&format!(
                "\nLowest average turnaround: {}\n",
                best.label()
            ));
        }
        output
    }
}

fn optional(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_scheduler::{compare_all, run_fifo, run_stcf, ProcessTable, SimConfig, WorkloadEntry};

    fn table(pairs: &[(i64, i64)]) -> ProcessTable {
        let entries: Vec<WorkloadEntry> = pairs
            .iter()
            .map(|&(arrival, burst)| WorkloadEntry::new(arrival, burst))
            .collect();
        ProcessTable::load(&entries, &SimConfig::default()).unwrap()
    }

    fn canonical() -> ProcessTable {
        table(&[(0, 5), (1, 3), (2, 8), (3, 6)])
    }

    fn row<'a>(report: &'a str, pid: &str) -> Vec<&'a str> {
        report
            .lines()
            .find(|line| line.starts_with(pid))
            .unwrap()
            .split_whitespace()
            .collect()
    }

    #[test]
    fn test_render_run_header_and_rows() {
        let result = run_fifo(&canonical()).unwrap();
        let report = ReportRenderer::default().render_run(&result);

        assert!(report.starts_with("=== FIFO Scheduling Results ===\n"));
        assert_eq!(row(&report, "P2"), vec!["P2", "1", "3", "8", "7", "4", "4"]);
        assert_eq!(row(&report, "P4"), vec!["P4", "3", "6", "22", "19", "13", "13"]);
        assert!(report.contains("Average Turnaround Time: 11.25\n"));
        assert!(report.contains("Average Waiting Time:    5.00\n"));
        assert!(report.contains("Average Response Time:   5.00\n"));
        assert!(report.contains("CPU Utilization:         100.00%\n"));
        assert!(!report.contains("Execution Trace"));
    }

    #[test]
    fn test_render_gantt_single_process() {
        let result = run_fifo(&table(&[(0, 2)])).unwrap();
        let gantt = ReportRenderer::default().render_gantt(&result.timeline);

        assert_eq!(gantt, "=== Gantt Chart ===\n|--P1--|\n0      2\n");
    }

    #[test]
    fn test_render_gantt_idle_segment() {
        let result = run_fifo(&table(&[(2, 1)])).unwrap();
        let gantt = ReportRenderer::default().render_gantt(&result.timeline);

        assert_eq!(
            gantt,
            "=== Gantt Chart ===\n|..IDLE..|-P1-|\n0        2    3\n"
        );
    }

    #[test]
    fn test_render_gantt_scale() {
        let result = run_fifo(&table(&[(0, 1)])).unwrap();
        let renderer = ReportRenderer::new(RenderOptions {
            gantt_scale: 3,
            show_trace: false,
        });

        assert_eq!(
            renderer.render_gantt(&result.timeline),
            "=== Gantt Chart ===\n|---P1---|\n0        1\n"
        );
    }

    #[test]
    fn test_render_gantt_markers_never_touch() {
        let result = run_fifo(&table(&[(0, 1000), (0, 1)])).unwrap();
        let renderer = ReportRenderer::new(RenderOptions {
            gantt_scale: 0,
            show_trace: false,
        });
        let gantt = renderer.render_gantt(&result.timeline);

        assert_eq!(gantt, "=== Gantt Chart ===\n|P1|P2|\n0  1000 1001\n");
    }

    #[test]
    fn test_render_gantt_caps_huge_interval() {
        let result = run_fifo(&table(&[(0, 100_000_000_000), (0, 1)])).unwrap();
        let gantt = ReportRenderer::default().render_gantt(&result.timeline);
        let lines: Vec<&str> = gantt.lines().collect();

        let fill = "-".repeat(MAX_SEGMENT_WIDTH);
        assert_eq!(lines[1], format!("|{}P1{}|-P2-|", fill, fill));

        let second_bar = 1 + 2 * MAX_SEGMENT_WIDTH + 2;
        let expected_markers = format!(
            "0{}100000000000 100000000001",
            " ".repeat(second_bar - 1)
        );
        assert_eq!(lines[2], expected_markers);
    }

    #[test]
    fn test_render_gantt_scale_saturates() {
        let result = run_fifo(&table(&[(0, 3)])).unwrap();
        let renderer = ReportRenderer::new(RenderOptions {
            gantt_scale: usize::MAX,
            show_trace: false,
        });
        let gantt = renderer.render_gantt(&result.timeline);

        let fill = "-".repeat(MAX_SEGMENT_WIDTH);
        assert_eq!(gantt.lines().nth(1), Some(format!("|{}P1{}|", fill, fill).as_str()));
    }

    #[test]
    fn test_render_trace_lists_events() {
        let result = run_stcf(&canonical()).unwrap();
        let renderer = ReportRenderer::new(RenderOptions {
            gantt_scale: 1,
            show_trace: true,
        });
        let report = renderer.render_run(&result);

        assert!(report.contains("=== Execution Trace ===\n"));
        assert!(report.contains("Time | Process | Remaining | Action\n"));
        assert!(report.contains("   1 | P1      | 4         | Preempt\n"));
        assert!(report.contains("   4 | P2      | 0         | Complete\n"));
    }

    #[test]
    fn test_render_trace_idle_row() {
        let result = run_fifo(&table(&[(5, 3)])).unwrap();
        let trace = ReportRenderer::default().render_trace(&result.events);

        assert!(trace.contains("   0 | IDLE    | -         | CPU Idle until 5\n"));
    }

    #[test]
    fn test_render_comparison() {
        let results = compare_all(&canonical(), 3).unwrap();
        let report = ReportRenderer::default().render_comparison(&results);

        assert!(report.starts_with("=== Policy Comparison ===\n"));
        let rr = report
            .lines()
            .find(|line| line.starts_with("Round Robin (q=3)"))
            .unwrap();
        assert!(rr.ends_with("14.00     8.50     3.00        22"));
        assert!(report.contains("Lowest average turnaround: STCF\n"));
    }

    #[test]
    fn test_render_comparison_empty() {
        let report = ReportRenderer::default().render_comparison(&[]);
        assert!(!report.contains("Lowest"));
    }
}
