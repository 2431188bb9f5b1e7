//! Job (process) model.
//!
//! A job is a unit of CPU work characterized by when it arrives, how much
//! CPU time it needs, and how important it is.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// Stable job identifier.
///
/// Also the final tie-breaker in every dispatch order.
pub type JobId = u32;

/// A job submitted to the simulator.
///
/// Immutable for the lifetime of a run. The engine copies every `JobSpec`
/// into its own runtime record, so the same slice can be simulated under
/// several policies with independent results.
///
/// # Time Representation
/// All times are integral ticks relative to the simulation epoch (t=0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobSpec {
    /// Unique job identifier.
    pub id: JobId,
    /// Tick at which the job becomes ready (must be ≥ 0).
    pub arrival_time: i64,
    /// Total CPU time required (must be > 0).
    pub burst_time: i64,
    /// Scheduling priority (lower = more important, must be ≥ 0).
    pub priority: i32,
}

/// Display class for a priority value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityClass {
    High,
    Medium,
    Low,
    Other,
}

impl JobSpec {
    /// Creates a job with priority 0.
    pub fn new(id: JobId, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Earliest tick at which the job could possibly finish.
    #[inline]
    pub fn earliest_completion(&self) -> i64 {
        self.arrival_time + self.burst_time
    }

    /// Priority class: 0 = High, 1 = Medium, 2 = Low.
    pub fn priority_class(&self) -> PriorityClass {
        PriorityClass::from_priority(self.priority)
    }

    /// Display label (`P<id>`).
    pub fn label(&self) -> String {
        format!("P{}", self.id)
    }
}

impl PriorityClass {
    /// Class of a raw priority value.
    pub fn from_priority(priority: i32) -> Self {
        match priority {
            0 => PriorityClass::High,
            1 => PriorityClass::Medium,
            2 => PriorityClass::Low,
            _ => PriorityClass::Other,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            PriorityClass::High => "High",
            PriorityClass::Medium => "Medium",
            PriorityClass::Low => "Low",
            PriorityClass::Other => "Other",
        }
    }
}
