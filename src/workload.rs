//! Synthetic workload generation.
//!
//! Draws random but always-valid job sets, for exercising the simulator
//! and for comparing policies on workloads nobody hand-picked.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::JobSpec;

/// Parameters for a random job set.
///
/// Bounds are inclusive. Out-of-range bounds are clamped so that every
/// generated job passes validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Number of jobs (ids `1..=job_count`).
    pub job_count: usize,
    /// Latest possible arrival tick.
    pub max_arrival: i64,
    /// Shortest possible burst.
    pub min_burst: i64,
    /// Longest possible burst.
    pub max_burst: i64,
    /// Priorities are drawn from `0..priority_levels`.
    pub priority_levels: i32,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            job_count: 5,
            max_arrival: 10,
            min_burst: 1,
            max_burst: 10,
            priority_levels: 3,
        }
    }
}

impl WorkloadConfig {
    /// Creates a config for `job_count` jobs with default bounds.
    pub fn new(job_count: usize) -> Self {
        Self {
            job_count,
            ..Default::default()
        }
    }

    /// Sets the latest arrival tick.
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the burst range.
    pub fn with_burst_range(mut self, min_burst: i64, max_burst: i64) -> Self {
        self.min_burst = min_burst;
        self.max_burst = max_burst;
        self
    }

    /// Sets the number of distinct priority levels.
    pub fn with_priority_levels(mut self, levels: i32) -> Self {
        self.priority_levels = levels;
        self
    }

    /// Generates a job set.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<JobSpec> {
        let max_arrival = self.max_arrival.max(0);
        let min_burst = self.min_burst.max(1);
        let max_burst = self.max_burst.max(min_burst);
        let levels = self.priority_levels.max(1);

        (1..=self.job_count as u32)
            .map(|id| {
                JobSpec::new(
                    id,
                    rng.random_range(0..=max_arrival),
                    rng.random_range(min_burst..=max_burst),
                )
                .with_priority(rng.random_range(0..levels))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_jobs;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_jobs_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = WorkloadConfig::new(50)
            .with_max_arrival(30)
            .with_burst_range(2, 6)
            .with_priority_levels(4);

        let jobs = config.generate(&mut rng);
        assert_eq!(jobs.len(), 50);
        assert!(validate_jobs(&jobs).is_ok());
        for job in &jobs {
            assert!((0..=30).contains(&job.arrival_time));
            assert!((2..=6).contains(&job.burst_time));
            assert!((0..4).contains(&job.priority));
        }
    }

    #[test]
    fn test_same_seed_same_workload() {
        let config = WorkloadConfig::default();
        let a = config.generate(&mut StdRng::seed_from_u64(42));
        let b = config.generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_bad_bounds_are_clamped() {
        let config = WorkloadConfig::new(10)
            .with_max_arrival(-5)
            .with_burst_range(0, -1)
            .with_priority_levels(0);
        let jobs = config.generate(&mut StdRng::seed_from_u64(1));
        assert!(validate_jobs(&jobs).is_ok());
        assert!(jobs.iter().all(|j| j.arrival_time == 0 && j.burst_time == 1 && j.priority == 0));
    }
}
