//! # Core Types
//!
//! This crate defines the fundamental types shared by the scheduling
//! simulator crates.
//!
//! ## Philosophy
//!
//! - **Static and run state are separate**: what the workload declared never
//!   changes, what a policy run writes is reset before the next run.
//! - **No sentinels**: unset timestamps are `None`, not `-1`.
//! - **Integer time**: all time values are whole ticks, so metric identities
//!   hold exactly.
//!
//! ## Key Types
//!
//! - [`ProcessId`]: Identifier assigned in workload order, starting at 1
//! - [`Ticks`]: Logical simulation time
//! - [`Process`]: One schedulable unit with its run state
//! - [`ProcessMetrics`]: Turnaround, waiting and response time of a finished process

pub mod ids;
pub mod process;

pub use ids::{ProcessId, Ticks};
pub use process::{Process, ProcessMetrics};
