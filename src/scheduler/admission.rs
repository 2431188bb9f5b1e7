//! Ready-queue admission.
//!
//! Holds jobs that have not yet been admitted, ordered by
//! `(arrival_time, id)`, and releases them as the simulated clock passes
//! their arrival.

use std::collections::VecDeque;

use tracing::debug;

use crate::models::{JobRuntime, JobSpec};

/// Jobs not yet admitted to the ready queue.
///
/// Admission only ever removes from the front, so a job is admitted at
/// most once and never before its arrival.
#[derive(Debug, Clone)]
pub struct ArrivalQueue {
    pending: VecDeque<JobSpec>,
}

impl ArrivalQueue {
    /// Copies and orders the given jobs by `(arrival_time, id)`.
    pub fn new(jobs: &[JobSpec]) -> Self {
        let mut pending = jobs.to_vec();
        pending.sort_by_key(|job| (job.arrival_time, job.id));
        Self {
            pending: pending.into(),
        }
    }

    /// Removes and returns every job with `arrival_time <= now`, in
    /// `(arrival_time, id)` order.
    pub fn admit(&mut self, now: i64) -> Vec<JobSpec> {
        let count = self
            .pending
            .iter()
            .take_while(|job| job.arrival_time <= now)
            .count();
        self.pending.drain(..count).collect()
    }

    /// Admits arrived jobs to the back of `ready`. Returns how many were
    /// admitted.
    pub fn admit_into(&mut self, now: i64, ready: &mut VecDeque<JobRuntime>) -> usize {
        let admitted = self.admit(now);
        let count = admitted.len();
        for spec in admitted {
            debug!(job = spec.id, arrival = spec.arrival_time, now, "admitted");
            let mut runtime = JobRuntime::new(spec);
            runtime.admit();
            ready.push_back(runtime);
        }
        count
    }

    /// Arrival tick of the next pending job.
    ///
    /// When the ready queue is empty, the clock jumps straight here.
    pub fn next_arrival(&self) -> Option<i64> {
        self.pending.front().map(|job| job.arrival_time)
    }

    /// Number of jobs still pending.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether every job has been admitted.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
