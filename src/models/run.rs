//! Run result model.
//!
//! A run result is the complete outcome of simulating one job set under one
//! policy: per-job timings in completion order, the execution timeline, and
//! aggregate metrics.

use serde::{Deserialize, Serialize};

use super::JobId;
use crate::dispatching::Policy;
use crate::scheduler::RunMetrics;

/// Timing outcome of a single job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOutcome {
    /// Job identifier.
    pub job_id: JobId,
    /// Arrival tick (copied from the input).
    pub arrival_time: i64,
    /// Burst length (copied from the input).
    pub burst_time: i64,
    /// Priority (copied from the input).
    pub priority: i32,
    /// First dispatch − arrival.
    pub response_time: i64,
    /// Completion − arrival.
    pub turnaround_time: i64,
    /// Tick at which the last slice ended.
    pub completion_time: i64,
    /// Time spent ready but not running.
    pub waiting_time: i64,
}

/// A contiguous interval during which one job held the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSlice {
    /// Job that ran.
    pub job_id: JobId,
    /// Start tick (inclusive).
    pub start: i64,
    /// End tick (exclusive).
    pub end: i64,
}

impl ExecutionSlice {
    /// Creates a new slice.
    pub fn new(job_id: JobId, start: i64, end: i64) -> Self {
        Self { job_id, start, end }
    }

    /// Slice length in ticks.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Complete result of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Policy the run was simulated under.
    pub policy: Policy,
    /// Per-job outcomes in completion order.
    pub outcomes: Vec<JobOutcome>,
    /// Execution slices in time order.
    pub timeline: Vec<ExecutionSlice>,
    /// Aggregate metrics.
    pub metrics: RunMetrics,
}

impl RunResult {
    /// Job ids in completion order.
    pub fn completion_order(&self) -> Vec<JobId> {
        self.outcomes.iter().map(|o| o.job_id).collect()
    }

    /// Outcome for the given job.
    pub fn outcome(&self, job_id: JobId) -> Option<&JobOutcome> {
        self.outcomes.iter().find(|o| o.job_id == job_id)
    }

    /// All slices given to the given job.
    pub fn slices_for(&self, job_id: JobId) -> impl Iterator<Item = &ExecutionSlice> {
        self.timeline.iter().filter(move |s| s.job_id == job_id)
    }

    /// Total ticks within `[0, makespan)` during which the CPU was idle.
    pub fn idle_time(&self) -> i64 {
        self.metrics.makespan - self.metrics.total_burst_consumed
    }

    /// Number of jobs simulated.
    pub fn job_count(&self) -> usize {
        self.outcomes.len()
    }
}
