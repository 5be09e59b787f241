//! Scheduling Audit Trail
//!
//! Every run records what the dispatcher did and when, in the order it did
//! it. The trail is part of the run result, so it is deterministic and can
//! be asserted on or rendered as an execution trace.
//!
//! ## Example
//!
//! ```
//! use sim_scheduler::audit::{ScheduleAuditLog, ScheduleEvent};
//! use core_types::ProcessId;
//!
//! let mut audit_log = ScheduleAuditLog::new();
//! audit_log.record(ScheduleEvent::Dispatched {
//!     process: ProcessId::new(1),
//!     at: 0,
//!     remaining: 5,
//! });
//!
//! assert_eq!(audit_log.len(), 1);
//! assert!(audit_log.has_event(|e| matches!(e, ScheduleEvent::Dispatched { .. })));
//! ```

use core_types::{ProcessId, Ticks};
use serde::{Deserialize, Serialize};

/// Scheduling event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum ScheduleEvent {
    /// Process took the CPU
    Dispatched {
        process: ProcessId,
        at: Ticks,
        remaining: Ticks,
    },
    /// Process lost the CPU to another process with work left
    Preempted {
        process: ProcessId,
        at: Ticks,
        remaining: Ticks,
    },
    /// Process finished its burst
    Completed { process: ProcessId, at: Ticks },
    /// No process was eligible over `[from, until)`
    CpuIdle { from: Ticks, until: Ticks },
}

impl ScheduleEvent {
    /// Simulated time at which the event happened
    pub fn timestamp(&self) -> Ticks {
        match self {
            ScheduleEvent::Dispatched { at, .. }
            | ScheduleEvent::Preempted { at, .. }
            | ScheduleEvent::Completed { at, .. } => *at,
            ScheduleEvent::CpuIdle { from, .. } => *from,
        }
    }

    /// Process the event is about, if any
    pub fn process(&self) -> Option<ProcessId> {
        match self {
            ScheduleEvent::Dispatched { process, .. }
            | ScheduleEvent::Preempted { process, .. }
            | ScheduleEvent::Completed { process, .. } => Some(*process),
            ScheduleEvent::CpuIdle { .. } => None,
        }
    }
}

/// Chronological list of scheduling events for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleAuditLog {
    events: Vec<ScheduleEvent>,
}

impl ScheduleAuditLog {
    /// Creates a new empty audit log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Records an event
    ///
    /// A `CpuIdle` that starts where the previous `CpuIdle` ended extends it.
    pub fn record(&mut self, event: ScheduleEvent) {
        if let ScheduleEvent::CpuIdle { from, until } = event {
            if let Some(ScheduleEvent::CpuIdle { until: last_until, .. }) = self.events.last_mut()
            {
                if *last_until == from {
                    *last_until = until;
                    return;
                }
            }
        }
        self.events.push(event);
    }

    /// Returns all recorded events
    pub fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }

    /// Returns events about a specific process
    pub fn events_for(&self, process: ProcessId) -> Vec<&ScheduleEvent> {
        self.events
            .iter()
            .filter(|event| event.process() == Some(process))
            .collect()
    }

    /// Counts events matching the predicate
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&ScheduleEvent) -> bool,
    {
        self.events.iter().filter(|event| predicate(event)).count()
    }

    /// Checks if any event matches the predicate
    pub fn has_event<F>(&self, predicate: F) -> bool
    where
        F: Fn(&ScheduleEvent) -> bool,
    {
        self.events.iter().any(predicate)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_query() {
        let mut log = ScheduleAuditLog::new();
        let p1 = ProcessId::new(1);
        let p2 = ProcessId::new(2);

        log.record(ScheduleEvent::Dispatched {
            process: p1,
            at: 0,
            remaining: 4,
        });
        log.record(ScheduleEvent::Preempted {
            process: p1,
            at: 1,
            remaining: 3,
        });
        log.record(ScheduleEvent::Dispatched {
            process: p2,
            at: 1,
            remaining: 1,
        });
        log.record(ScheduleEvent::Completed { process: p2, at: 2 });

        assert_eq!(log.len(), 4);
        assert_eq!(log.events_for(p1).len(), 2);
        assert_eq!(
            log.count_events(|e| matches!(e, ScheduleEvent::Dispatched { .. })),
            2
        );
        assert!(!log.has_event(|e| matches!(e, ScheduleEvent::CpuIdle { .. })));
    }

    #[test]
    fn test_contiguous_idle_events_merge() {
        let mut log = ScheduleAuditLog::new();
        log.record(ScheduleEvent::CpuIdle { from: 0, until: 1 });
        log.record(ScheduleEvent::CpuIdle { from: 1, until: 2 });
        log.record(ScheduleEvent::CpuIdle { from: 2, until: 5 });

        assert_eq!(log.events(), &[ScheduleEvent::CpuIdle { from: 0, until: 5 }]);
    }

    #[test]
    fn test_event_accessors() {
        let event = ScheduleEvent::Completed {
            process: ProcessId::new(3),
            at: 9,
        };
        assert_eq!(event.timestamp(), 9);
        assert_eq!(event.process(), Some(ProcessId::new(3)));

        let idle = ScheduleEvent::CpuIdle { from: 4, until: 6 };
        assert_eq!(idle.timestamp(), 4);
        assert_eq!(idle.process(), None);
    }

    #[test]
    fn test_event_serializes_tagged() {
        let json = serde_json::to_string(&ScheduleEvent::CpuIdle { from: 0, until: 5 }).unwrap();
        assert_eq!(json, r#"{"event":"cpu_idle","from":0,"until":5}"#);
    }
}
