//! Per-run mutable job state.

use super::{JobOutcome, JobSpec};

/// Lifecycle of a job within one run.
///
/// `Waiting → Ready → Running → (Ready → Running)* → Done`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Not yet arrived (or not yet admitted).
    Waiting,
    /// In the ready queue.
    Ready,
    /// Holding the CPU.
    Running,
    /// All burst time consumed.
    Done,
}

/// Runtime record for one job in one run.
///
/// Created from a [`JobSpec`] at run start and discarded once the job's
/// [`JobOutcome`] is produced.
#[derive(Debug, Clone)]
pub struct JobRuntime {
    /// Private copy of the input job.
    pub spec: JobSpec,
    /// Current lifecycle state.
    pub state: JobState,
    /// CPU time still owed to the job.
    pub remaining_time: i64,
    /// Tick of the first dispatch. `None` until the job first runs.
    pub first_dispatch: Option<i64>,
    /// Accumulated time spent ready but not running.
    pub waiting_time: i64,
    /// Tick at which the job last entered the ready queue.
    ready_since: i64,
}

impl JobRuntime {
    /// Creates a fresh runtime record.
    pub fn new(spec: JobSpec) -> Self {
        Self {
            spec,
            state: JobState::Waiting,
            remaining_time: spec.burst_time,
            first_dispatch: None,
            waiting_time: 0,
            ready_since: spec.arrival_time,
        }
    }

    /// Moves an arrived job into the ready queue.
    ///
    /// The job counts as ready from its arrival tick, even when admission
    /// happens later (at the end of a slice that spanned the arrival).
    pub fn admit(&mut self) {
        self.state = JobState::Ready;
        self.ready_since = self.spec.arrival_time;
    }

    /// Hands the CPU to this job at `now`.
    pub fn dispatch(&mut self, now: i64) {
        debug_assert!(now >= self.ready_since);
        self.waiting_time += now - self.ready_since;
        self.first_dispatch.get_or_insert(now);
        self.state = JobState::Running;
    }

    /// Consumes `slice` ticks of CPU time.
    pub fn run_for(&mut self, slice: i64) {
        debug_assert!(slice > 0 && slice <= self.remaining_time);
        self.remaining_time -= slice;
    }

    /// Returns a preempted job to the ready queue at `now`.
    pub fn preempt(&mut self, now: i64) {
        self.state = JobState::Ready;
        self.ready_since = now;
    }

    /// Whether all burst time has been consumed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Marks the job done at `now` and derives its outcome.
    pub fn complete(&mut self, now: i64) -> JobOutcome {
        debug_assert!(self.is_finished());
        self.state = JobState::Done;

        let first_dispatch = self.first_dispatch.unwrap_or(now);
        let turnaround_time = now - self.spec.arrival_time;
        debug_assert_eq!(self.waiting_time, turnaround_time - self.spec.burst_time);

        JobOutcome {
            job_id: self.spec.id,
            arrival_time: self.spec.arrival_time,
            burst_time: self.spec.burst_time,
            priority: self.spec.priority,
            response_time: first_dispatch - self.spec.arrival_time,
            turnaround_time,
            completion_time: now,
            waiting_time: self.waiting_time,
        }
    }
}
