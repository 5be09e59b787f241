//! # Simulator Runtime
//!
//! Loads a workload, runs the requested policies and renders the output.

use crate::workload_file::{load_workload_file, parse_workload, WorkloadFileError, WorkloadFormat};
use report_renderer::{RenderOptions, ReportRenderer};
use sim_logger::{LogEntry, LogLevel, Logger};
use sim_scheduler::{
    build_policy, compare_all, run_policy, PolicyKind, ProcessTable, RunResult, SchedError,
    ScheduleEvent, SimConfig, WorkloadEntry, DEFAULT_MAX_PROCESSES, DEFAULT_QUANTUM,
};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Runtime error types
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Workload file error: {0}")]
    WorkloadFile(#[from] WorkloadFileError),

    #[error("Scheduling error: {0}")]
    Sched(#[from] SchedError),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Which policies to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Single(PolicyKind),
    /// Every policy followed by a comparison table
    All,
}

impl FromStr for RunMode {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(RunMode::All);
        }
        s.parse::<PolicyKind>()
            .map(RunMode::Single)
            .map_err(|e| RuntimeError::InvalidArguments(e.to_string()))
    }
}

/// Output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(RuntimeError::InvalidArguments(format!(
                "Invalid format: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub mode: RunMode,
    /// Workload file; text unless the extension is `.json`
    pub workload_path: Option<PathBuf>,
    /// Round-robin quantum, validated by the engine
    pub quantum: i64,
    pub format: OutputFormat,
    /// Gantt fill characters per tick
    pub gantt_scale: usize,
    pub show_trace: bool,
    /// Minimum level kept by the runtime logger
    pub log_level: LogLevel,
    pub max_processes: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::All,
            workload_path: None,
            quantum: DEFAULT_QUANTUM as i64,
            format: OutputFormat::Text,
            gantt_scale: 1,
            show_trace: false,
            log_level: LogLevel::Warn,
            max_processes: DEFAULT_MAX_PROCESSES,
        }
    }
}

/// Simulator runtime
pub struct SimRuntime {
    config: RunnerConfig,
    renderer: ReportRenderer,
    logger: Logger,
}

impl SimRuntime {
    /// Creates a new runtime
    pub fn new(config: RunnerConfig) -> Result<Self, RuntimeError> {
        if config.gantt_scale == 0 {
            return Err(RuntimeError::InvalidArguments(
                "Gantt scale must be at least 1".to_string(),
            ));
        }

        let renderer = ReportRenderer::new(RenderOptions {
            gantt_scale: config.gantt_scale,
            show_trace: config.show_trace,
        });
        let logger = Logger::new(config.log_level);

        Ok(Self {
            config,
            renderer,
            logger,
        })
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Log entries collected so far
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut Logger {
        &mut self.logger
    }

    /// Loads the configured workload file and runs it
    pub fn run(&mut self) -> Result<String, RuntimeError> {
        let path = self
            .config
            .workload_path
            .clone()
            .ok_or_else(|| RuntimeError::InvalidArguments("Missing workload file".to_string()))?;

        let entries = load_workload_file(&path)?;
        self.logger.log(
            LogEntry::new(LogLevel::Debug, "workload file read")
                .with_field("path", path.display())
                .with_field("format", format!("{:?}", WorkloadFormat::from_path(&path))),
        );
        self.run_entries(&entries)
    }

    /// Runs a workload given as text in `format`
    pub fn run_text(&mut self, text: &str, format: WorkloadFormat) -> Result<String, RuntimeError> {
        let entries = parse_workload(text, format)?;
        self.run_entries(&entries)
    }

    /// Validates `entries` and runs the configured policies
    pub fn run_entries(&mut self, entries: &[WorkloadEntry]) -> Result<String, RuntimeError> {
        let sim_config = SimConfig {
            max_processes: self.config.max_processes,
            default_quantum: DEFAULT_QUANTUM,
        };

        let table = match ProcessTable::load(entries, &sim_config) {
            Ok(table) => table,
            Err(e) => {
                self.logger.log(
                    LogEntry::new(LogLevel::Error, "workload rejected")
                        .with_field("reason", &e),
                );
                return Err(e.into());
            }
        };
        self.logger.log(
            LogEntry::new(LogLevel::Info, "workload loaded")
                .with_field("processes", table.len())
                .with_field("total_burst", table.total_burst()),
        );

        let results = match self.config.mode {
            RunMode::Single(kind) => {
                let policy = build_policy(kind, self.config.quantum)?;
                vec![run_policy(&table, policy.as_ref())?]
            }
            RunMode::All => compare_all(&table, self.config.quantum)?,
        };

        for result in &results {
            self.log_result(result);
        }

        self.render(&results)
    }

    fn log_result(&mut self, result: &RunResult) {
        for event in result.events.events() {
            let mut entry = LogEntry::new(LogLevel::Debug, event_message(event))
                .with_field("policy", result.label())
                .with_field("at", event.timestamp());
            if let Some(process) = event.process() {
                entry = entry.with_source(process);
            }
            self.logger.log(entry);
        }

        self.logger.log(
            LogEntry::new(LogLevel::Info, "run finished")
                .with_field("policy", result.label())
                .with_field("makespan", result.makespan())
                .with_field("avg_turnaround", format!("{:.2}", result.averages.turnaround_time))
                .with_field("avg_waiting", format!("{:.2}", result.averages.waiting_time))
                .with_field("avg_response", format!("{:.2}", result.averages.response_time)),
        );
    }

    fn render(&self, results: &[RunResult]) -> Result<String, RuntimeError> {
        match (self.config.format, self.config.mode) {
            (OutputFormat::Json, RunMode::Single(_)) => {
                Ok(serde_json::to_string_pretty(&results[0])?)
            }
            (OutputFormat::Json, RunMode::All) => Ok(serde_json::to_string_pretty(results)?),
            (OutputFormat::Text, RunMode::Single(_)) => {
                Ok(self.renderer.render_run(&results[0]))
            }
            (OutputFormat::Text, RunMode::All) => {
                let mut output = String::new();
                for result in results {
                    output.push_str(&self.renderer.render_run(result));
                    output.push('\n');
                }
                output.push_str(&self.renderer.render_comparison(results));
                Ok(output)
            }
        }
    }
}

fn event_message(event: &ScheduleEvent) -> &'static str {
    match event {
        ScheduleEvent::Dispatched { .. } => "dispatched",
        ScheduleEvent::Preempted { .. } => "preempted",
        ScheduleEvent::Completed { .. } => "completed",
        ScheduleEvent::CpuIdle { .. } => "cpu idle",
    }
}
