//! Single-CPU simulation driver.
//!
//! # Algorithm
//!
//! 1. Validate the job set and policy; copy the jobs into an arrival queue.
//! 2. Admit every job that has arrived by the current clock.
//! 3. If nothing is ready, jump the clock to the next arrival.
//! 4. Ask the policy for the next job and slice length; run it.
//! 5. Admit jobs that arrived during the slice, *then* either complete the
//!    job or re-queue it behind them.
//! 6. Repeat until every job is done; aggregate metrics.
//!
//! # Complexity
//! O(n log n) for ordering arrivals, plus O(n) per dispatch for the
//! rule-based policies. Idle gaps cost O(1) regardless of length.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use super::{ArrivalQueue, RunMetrics};
use crate::dispatching::Policy;
use crate::error::SimulationError;
use crate::models::{ExecutionSlice, JobRuntime, JobSpec, RunResult};
use crate::validation::validate_jobs;

/// Input container for a simulation.
///
/// Serializable, so a whole run can be described in one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Jobs to simulate.
    pub jobs: Vec<JobSpec>,
    /// Scheduling policy.
    pub policy: Policy,
}

impl SimulationRequest {
    /// Creates a new request.
    pub fn new(jobs: Vec<JobSpec>, policy: Policy) -> Self {
        Self { jobs, policy }
    }

    /// Runs the simulation.
    pub fn run(&self) -> Result<RunResult, SimulationError> {
        Simulator::new(self.policy).run(&self.jobs)
    }
}

/// Deterministic single-CPU scheduling simulator.
///
/// Holds no state between runs; the same simulator can be reused, shared,
/// or cloned freely.
///
/// # Example
///
/// ```
/// use cpu_schedsim::dispatching::Policy;
/// use cpu_schedsim::models::JobSpec;
/// use cpu_schedsim::scheduler::Simulator;
///
/// let jobs = vec![JobSpec::new(1, 0, 3), JobSpec::new(2, 1, 2)];
/// let run = Simulator::new(Policy::Fcfs).run(&jobs).unwrap();
/// assert_eq!(run.completion_order(), vec![1, 2]);
/// assert_eq!(run.metrics.makespan, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simulator {
    policy: Policy,
}

impl Simulator {
    /// Creates a simulator for the given policy.
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    /// The policy this simulator runs.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Simulates `jobs` to completion.
    ///
    /// `jobs` is only read; the run works on private copies.
    pub fn run(&self, jobs: &[JobSpec]) -> Result<RunResult, SimulationError> {
        let span = info_span!("simulate", policy = %self.policy, jobs = jobs.len());
        let _enter = span.enter();

        self.check_input(jobs)?;

        let engine = self.policy.rule_engine();
        let mut arrivals = ArrivalQueue::new(jobs);
        let mut ready: VecDeque<JobRuntime> = VecDeque::with_capacity(jobs.len());
        let mut outcomes = Vec::with_capacity(jobs.len());
        let mut timeline = Vec::new();
        let mut clock: i64 = 0;

        loop {
            arrivals.admit_into(clock, &mut ready);

            let Some(decision) = self.policy.select_next(engine.as_ref(), &ready) else {
                match arrivals.next_arrival() {
                    Some(next) => {
                        debug!(from = clock, to = next, "cpu idle, advancing clock");
                        clock = clock.max(next);
                        continue;
                    }
                    None => break,
                }
            };

            let Some(mut job) = ready.remove(decision.index) else {
                break;
            };

            let start = clock;
            job.dispatch(start);
            job.run_for(decision.slice);
            clock += decision.slice;
            timeline.push(ExecutionSlice::new(job.spec.id, start, clock));
            debug!(
                job = job.spec.id,
                start,
                end = clock,
                remaining = job.remaining_time,
                "dispatched"
            );

            // Arrivals during the slice queue ahead of a preempted job.
            arrivals.admit_into(clock, &mut ready);

            if job.is_finished() {
                outcomes.push(job.complete(clock));
            } else {
                job.preempt(clock);
                ready.push_back(job);
            }
        }

        let metrics = RunMetrics::calculate(&outcomes, &timeline);
        info!(
            makespan = metrics.makespan,
            avg_turnaround = metrics.average_turnaround,
            avg_waiting = metrics.average_waiting,
            utilization = metrics.cpu_utilization,
            "simulation complete"
        );

        Ok(RunResult {
            policy: self.policy,
            outcomes,
            timeline,
            metrics,
        })
    }

    fn check_input(&self, jobs: &[JobSpec]) -> Result<(), SimulationError> {
        if jobs.is_empty() {
            warn!("rejected empty job set");
            return Err(SimulationError::EmptyJobSet);
        }
        if let Err(err) = self.policy.validate() {
            warn!(quantum = ?self.policy.quantum(), "rejected invalid quantum");
            return Err(err);
        }
        validate_jobs(jobs).map_err(|errors| {
            warn!(issues = errors.len(), "rejected invalid job set");
            SimulationError::InvalidJob(errors)
        })
    }
}

/// Simulates `jobs` under `policy`.
pub fn simulate(jobs: &[JobSpec], policy: Policy) -> Result<RunResult, SimulationError> {
    Simulator::new(policy).run(jobs)
}

/// Simulates `jobs` under every policy, Round-Robin using `quantum`.
///
/// Results are in the order FCFS, SJF, Priority, RR. Each run is
/// independent of the others. An empty job set is reported before the
/// quantum is checked, as in [`simulate`].
pub fn compare(jobs: &[JobSpec], quantum: i64) -> Result<Vec<RunResult>, SimulationError> {
    if jobs.is_empty() {
        warn!("rejected empty job set");
        return Err(SimulationError::EmptyJobSet);
    }
    Policy::all(quantum)?
        .into_iter()
        .map(|policy| simulate(jobs, policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;
    use crate::workload::WorkloadConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn scenario() -> Vec<JobSpec> {
        vec![
            JobSpec::new(1, 0, 8).with_priority(2),
            JobSpec::new(2, 1, 4).with_priority(1),
            JobSpec::new(3, 2, 9).with_priority(3),
            JobSpec::new(4, 3, 5).with_priority(4),
        ]
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_warnings(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn waits(run: &RunResult) -> Vec<i64> {
        run.outcomes.iter().map(|o| o.waiting_time).collect()
    }

    fn assert_invariants(jobs: &[JobSpec], run: &RunResult) {
        assert_eq!(run.outcomes.len(), jobs.len());
        for job in jobs {
            let o = run.outcome(job.id).unwrap();
            assert_eq!(o.waiting_time + job.burst_time, o.turnaround_time);
            assert!(o.waiting_time >= 0);
            assert!(o.response_time >= 0);
            assert!(o.response_time <= o.waiting_time);
            assert_eq!(o.completion_time, job.arrival_time + o.waiting_time + job.burst_time);
            assert!(o.completion_time >= job.earliest_completion());

            let executed: i64 = run.slices_for(job.id).map(|s| s.duration()).sum();
            assert_eq!(executed, job.burst_time);
            let first = run.slices_for(job.id).next().unwrap();
            assert_eq!(first.start - job.arrival_time, o.response_time);
            assert!(first.start >= job.arrival_time);
        }

        let total: i64 = jobs.iter().map(|j| j.burst_time).sum();
        assert_eq!(run.metrics.total_burst_consumed, total);

        // Timeline never overlaps or runs backwards
        for pair in run.timeline.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        // Outcomes are in completion order
        for pair in run.outcomes.windows(2) {
            assert!(pair[0].completion_time <= pair[1].completion_time);
        }
    }

    #[test]
    fn test_fcfs_scenario() {
        let run = simulate(&scenario(), Policy::Fcfs).unwrap();
        assert_eq!(run.completion_order(), vec![1, 2, 3, 4]);
        assert_eq!(waits(&run), vec![0, 7, 10, 18]);
        assert!((run.metrics.average_waiting - 8.75).abs() < 1e-10);
        assert!((run.metrics.cpu_utilization - 1.0).abs() < 1e-10);
        assert_invariants(&scenario(), &run);
    }

    #[test]
    fn test_sjf_scenario() {
        let run = simulate(&scenario(), Policy::Sjf).unwrap();
        assert_eq!(run.completion_order(), vec![1, 2, 4, 3]);
        assert_eq!(waits(&run), vec![0, 7, 9, 15]);
        assert!((run.metrics.average_waiting - 7.75).abs() < 1e-10);
        assert_invariants(&scenario(), &run);
    }

    #[test]
    fn test_priority_scenario() {
        let run = simulate(&scenario(), Policy::Priority).unwrap();
        assert_eq!(run.completion_order(), vec![1, 2, 3, 4]);
        assert_eq!(waits(&run), vec![0, 7, 10, 18]);
        assert!((run.metrics.average_waiting - 8.75).abs() < 1e-10);
        assert_invariants(&scenario(), &run);
    }

    #[test]
    fn test_round_robin_scenario() {
        let run = simulate(&scenario(), Policy::RoundRobin { quantum: 4 }).unwrap();
        assert_eq!(run.completion_order(), vec![2, 1, 4, 3]);

        let completion = |id| run.outcome(id).unwrap().completion_time;
        assert_eq!(completion(2), 8);
        assert_eq!(completion(1), 20);
        assert_eq!(completion(4), 25);
        assert_eq!(completion(3), 26);

        let wait = |id| run.outcome(id).unwrap().waiting_time;
        assert_eq!(wait(1), 12);
        assert_eq!(wait(2), 3);
        assert_eq!(wait(3), 15);
        assert_eq!(wait(4), 17);

        assert!((run.metrics.average_waiting - 11.75).abs() < 1e-10);
        assert!((run.metrics.average_turnaround - 18.25).abs() < 1e-10);
        assert!((run.metrics.throughput - 4.0 / 26.0).abs() < 1e-10);
        assert_invariants(&scenario(), &run);
    }

    #[test]
    fn test_round_robin_new_arrivals_before_preempted() {
        // P1 is preempted at t=4; P2 arrived during its slice and must run
        // before P1's second slice.
        let jobs = vec![JobSpec::new(1, 0, 6), JobSpec::new(2, 2, 2)];
        let run = simulate(&jobs, Policy::RoundRobin { quantum: 4 }).unwrap();
        let order: Vec<_> = run.timeline.iter().map(|s| (s.job_id, s.start, s.end)).collect();
        assert_eq!(order, vec![(1, 0, 4), (2, 4, 6), (1, 6, 8)]);
    }

    #[test]
    fn test_round_robin_arrival_at_slice_end() {
        // P2 arrives exactly when P1's quantum expires: it still goes first.
        let jobs = vec![JobSpec::new(1, 0, 4), JobSpec::new(2, 2, 1)];
        let run = simulate(&jobs, Policy::RoundRobin { quantum: 2 }).unwrap();
        let order: Vec<_> = run.timeline.iter().map(|s| s.job_id).collect();
        assert_eq!(order, vec![1, 2, 1]);
    }

    #[test]
    fn test_response_time_fixed_at_first_dispatch() {
        let jobs = vec![JobSpec::new(1, 0, 10), JobSpec::new(2, 0, 10)];
        let run = simulate(&jobs, Policy::RoundRobin { quantum: 3 }).unwrap();
        assert_eq!(run.outcome(1).unwrap().response_time, 0);
        assert_eq!(run.outcome(2).unwrap().response_time, 3);
        assert!(run.slices_for(1).count() > 1);
    }

    #[test]
    fn test_idle_gap_is_skipped() {
        let jobs = vec![JobSpec::new(1, 0, 2), JobSpec::new(2, 1000, 3)];
        let run = simulate(&jobs, Policy::Fcfs).unwrap();
        assert_eq!(run.outcome(2).unwrap().completion_time, 1003);
        assert_eq!(run.outcome(2).unwrap().waiting_time, 0);
        assert_eq!(run.timeline.len(), 2);
        assert_eq!(run.idle_time(), 998);
    }

    #[test]
    fn test_fcfs_utilization_reflects_late_start() {
        let jobs = vec![JobSpec::new(1, 5, 5)];
        let run = simulate(&jobs, Policy::Fcfs).unwrap();
        assert_eq!(run.metrics.makespan, 10);
        assert!((run.metrics.cpu_utilization - 0.5).abs() < 1e-10);
        assert!((run.metrics.throughput - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_sjf_is_non_preemptive() {
        // P2 is shorter but arrives after P1 started
        let jobs = vec![JobSpec::new(1, 0, 10), JobSpec::new(2, 1, 1)];
        let run = simulate(&jobs, Policy::Sjf).unwrap();
        assert_eq!(run.completion_order(), vec![1, 2]);
        assert_eq!(run.outcome(2).unwrap().waiting_time, 9);
    }

    #[test]
    fn test_sjf_ties_by_arrival_then_id() {
        let jobs = vec![
            JobSpec::new(1, 0, 5),
            JobSpec::new(4, 2, 3),
            JobSpec::new(3, 1, 3),
            JobSpec::new(2, 1, 3),
        ];
        let run = simulate(&jobs, Policy::Sjf).unwrap();
        assert_eq!(run.completion_order(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_priority_starvation_without_aging() {
        let mut jobs = vec![
            JobSpec::new(1, 0, 1).with_priority(0),
            JobSpec::new(2, 0, 1).with_priority(9),
        ];
        // A steady stream of important work keeps P2 waiting
        for id in 3..10 {
            jobs.push(JobSpec::new(id, i64::from(id) - 2, 1).with_priority(0));
        }
        let run = simulate(&jobs, Policy::Priority).unwrap();
        assert_eq!(run.completion_order().last(), Some(&2));
    }

    #[test]
    fn test_unsorted_input_and_input_untouched() {
        let mut jobs = scenario();
        jobs.reverse();
        let before = jobs.clone();
        let run = simulate(&jobs, Policy::Fcfs).unwrap();
        assert_eq!(run.completion_order(), vec![1, 2, 3, 4]);
        assert_eq!(jobs, before);
    }

    #[test]
    fn test_runs_are_independent() {
        let jobs = scenario();
        let first = simulate(&jobs, Policy::RoundRobin { quantum: 4 }).unwrap();
        let _ = compare(&jobs, 2).unwrap();
        let again = simulate(&jobs, Policy::RoundRobin { quantum: 4 }).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_compare_all_policies() {
        let runs = compare(&scenario(), 4).unwrap();
        let labels: Vec<_> = runs.iter().map(|r| r.policy.to_string()).collect();
        assert_eq!(labels, vec!["FCFS", "SJF", "Priority", "RR(Q=4)"]);
        for run in &runs {
            assert_invariants(&scenario(), run);
        }
    }

    #[test]
    fn test_request_runs() {
        let request = SimulationRequest::new(scenario(), Policy::Sjf);
        let json = serde_json::to_string(&request).unwrap();
        let parsed: SimulationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
        assert_eq!(parsed.run().unwrap().completion_order(), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_empty_job_set() {
        assert_eq!(simulate(&[], Policy::Fcfs), Err(SimulationError::EmptyJobSet));
        assert_eq!(
            compare(&[], 4).unwrap_err(),
            SimulationError::EmptyJobSet
        );
        assert_eq!(
            simulate(&[], Policy::RoundRobin { quantum: 0 }),
            Err(SimulationError::EmptyJobSet)
        );
        assert_eq!(compare(&[], 0), Err(SimulationError::EmptyJobSet));
    }

    #[test]
    fn test_invalid_quantum() {
        for quantum in [0, -1] {
            assert_eq!(
                simulate(&scenario(), Policy::RoundRobin { quantum }),
                Err(SimulationError::InvalidQuantum(Some(quantum)))
            );
        }
        assert!(matches!(
            compare(&scenario(), 0),
            Err(SimulationError::InvalidQuantum(Some(0)))
        ));
    }

    #[test]
    fn test_zero_burst_rejected() {
        let jobs = vec![JobSpec::new(1, 0, 0)];
        match simulate(&jobs, Policy::Fcfs) {
            Err(SimulationError::InvalidJob(errors)) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveBurst);
            }
            other => panic!("expected InvalidJob, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_quantum_is_logged() {
        let logs = capture_warnings(|| {
            let _ = simulate(&scenario(), Policy::RoundRobin { quantum: 0 });
        });
        assert!(logs.contains("rejected invalid quantum"));
        assert!(logs.contains("quantum=Some(0)"));
    }

    #[test]
    fn test_schedule_past_max_tick_rejected() {
        let late = vec![JobSpec::new(1, i64::MAX - 1, 5)];
        let huge = vec![
            JobSpec::new(1, 0, i64::MAX / 2 + 1),
            JobSpec::new(2, 0, i64::MAX / 2 + 1),
        ];
        for jobs in [late, huge] {
            for policy in Policy::all(4).unwrap() {
                match simulate(&jobs, policy) {
                    Err(SimulationError::InvalidJob(errors)) => {
                        assert_eq!(errors[0].kind, ValidationErrorKind::HorizonOverflow);
                    }
                    other => panic!("expected InvalidJob, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_schedule_near_max_tick() {
        let jobs = vec![JobSpec::new(1, i64::MAX - 5, 3), JobSpec::new(2, 0, 2)];
        let run = simulate(&jobs, Policy::RoundRobin { quantum: 1 }).unwrap();
        assert_eq!(run.metrics.makespan, i64::MAX - 2);
        assert_eq!(run.idle_time(), i64::MAX - 7);
        assert_invariants(&jobs, &run);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let jobs = vec![JobSpec::new(1, 0, 2), JobSpec::new(1, 3, 2)];
        assert!(matches!(
            simulate(&jobs, Policy::Sjf),
            Err(SimulationError::InvalidJob(_))
        ));
    }

    #[test]
    fn test_random_workloads_hold_invariants() {
        let mut rng = StdRng::seed_from_u64(2024);
        let config = WorkloadConfig::new(12)
            .with_max_arrival(40)
            .with_burst_range(1, 12)
            .with_priority_levels(4);

        for _ in 0..50 {
            let jobs = config.generate(&mut rng);
            for policy in Policy::all(3).unwrap() {
                let run = simulate(&jobs, policy).unwrap();
                assert_invariants(&jobs, &run);
            }
        }
    }

    #[test]
    fn test_round_robin_large_quantum_matches_fcfs() {
        let mut rng = StdRng::seed_from_u64(99);
        let config = WorkloadConfig::new(10).with_max_arrival(25);

        for _ in 0..50 {
            let jobs = config.generate(&mut rng);
            let max_burst = jobs.iter().map(|j| j.burst_time).max().unwrap();
            let fcfs = simulate(&jobs, Policy::Fcfs).unwrap();
            let rr = simulate(&jobs, Policy::RoundRobin { quantum: max_burst }).unwrap();
            assert_eq!(rr.outcomes, fcfs.outcomes);
            assert_eq!(rr.timeline, fcfs.timeline);
            assert_eq!(rr.metrics, fcfs.metrics);
        }
    }

    #[test]
    fn test_sjf_minimizes_average_waiting_when_all_arrive_together() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = WorkloadConfig::new(8).with_max_arrival(0);

        for _ in 0..20 {
            let jobs = config.generate(&mut rng);
            let sjf = simulate(&jobs, Policy::Sjf).unwrap();
            let fcfs = simulate(&jobs, Policy::Fcfs).unwrap();
            let priority = simulate(&jobs, Policy::Priority).unwrap();
            assert!(sjf.metrics.average_waiting <= fcfs.metrics.average_waiting + 1e-10);
            assert!(sjf.metrics.average_waiting <= priority.metrics.average_waiting + 1e-10);
        }
    }
}
