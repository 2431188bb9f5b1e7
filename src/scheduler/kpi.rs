//! Run quality metrics (KPIs).
//!
//! Computes standard CPU-scheduling performance indicators from the
//! outcomes and execution timeline of a completed run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest completion time (elapsed simulated time) |
//! | Avg Turnaround | Mean of completion − arrival |
//! | Avg Waiting | Mean of turnaround − burst |
//! | Avg Response | Mean of first dispatch − arrival |
//! | Throughput | Jobs / makespan |
//! | CPU Utilization | Busy ticks / makespan |
//!
//! Elapsed time is always measured from t=0, so idle time before the
//! first arrival lowers both throughput and utilization.

use serde::{Deserialize, Serialize};

use crate::models::{ExecutionSlice, JobOutcome};

/// Run performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Mean turnaround time (ticks).
    pub average_turnaround: f64,
    /// Mean waiting time (ticks).
    pub average_waiting: f64,
    /// Mean response time (ticks).
    pub average_response: f64,
    /// Completed jobs per tick of elapsed time.
    pub throughput: f64,
    /// Sum of all execution slices (ticks).
    pub total_burst_consumed: i64,
    /// Fraction of elapsed time the CPU was busy (0.0..1.0).
    pub cpu_utilization: f64,
    /// Latest completion time (ticks).
    pub makespan: i64,
}

impl RunMetrics {
    /// Computes metrics from job outcomes and the execution timeline.
    ///
    /// Empty input yields all-zero metrics.
    pub fn calculate(outcomes: &[JobOutcome], timeline: &[ExecutionSlice]) -> Self {
        let makespan = outcomes
            .iter()
            .map(|o| o.completion_time)
            .max()
            .unwrap_or(0);
        let total_burst_consumed: i64 = timeline.iter().map(ExecutionSlice::duration).sum();

        let count = outcomes.len();

        let per_elapsed = |value: f64| {
            if makespan <= 0 {
                0.0
            } else {
                value / makespan as f64
            }
        };

        Self {
            average_turnaround: mean(outcomes.iter().map(|o| o.turnaround_time)),
            average_waiting: mean(outcomes.iter().map(|o| o.waiting_time)),
            average_response: mean(outcomes.iter().map(|o| o.response_time)),
            throughput: per_elapsed(count as f64),
            total_burst_consumed,
            cpu_utilization: per_elapsed(total_burst_consumed as f64),
            makespan,
        }
    }

    /// CPU utilization as a percentage.
    pub fn cpu_utilization_percent(&self) -> f64 {
        self.cpu_utilization * 100.0
    }
}

/// Mean of tick values, summed in `f64` since the total may exceed `i64`.
fn mean(values: impl ExactSizeIterator<Item = i64>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    values.map(|v| v as f64).sum::<f64>() / count as f64
}
