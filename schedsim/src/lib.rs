//! # Scheduling Simulator Runner
//!
//! Host side of the simulator: reads workload files, drives the engine and
//! renders reports.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: the engine never touches files or stdout
//! - **Validation is the engine's job**: the file loader only parses, the
//!   engine decides what a valid workload is
//! - **Deterministic output**: same file + same arguments => same report
//!
//! ## Responsibilities
//!
//! The runner:
//! - Parses text and JSON workload files
//! - Runs one policy, or all four and a comparison
//! - Renders text or JSON output
//! - Collects structured log entries for the caller to emit

pub mod runtime;
pub mod workload_file;

pub use runtime::{OutputFormat, RunMode, RunnerConfig, RuntimeError, SimRuntime};
pub use workload_file::{
    load_workload_file, parse_text, parse_workload, WorkloadFileError, WorkloadFormat,
};
