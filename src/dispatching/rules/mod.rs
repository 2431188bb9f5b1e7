//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Arrival-based**: FIFO
//! - **Time-based**: SJF
//! - **Priority**: PRIORITY
//!
//! # Score Convention
//! All rules return lower scores for jobs that should run first.
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

use super::{DispatchingRule, RuleScore};
use crate::models::JobSpec;

/// First In First Out.
///
/// Prioritizes jobs by arrival time.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl DispatchingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, job: &JobSpec) -> RuleScore {
        job.arrival_time
    }
}

/// Shortest Job First.
///
/// Prioritizes jobs with the shortest total burst. Minimizes average
/// waiting time among non-preemptive policies.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl DispatchingRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, job: &JobSpec) -> RuleScore {
        job.burst_time
    }
}

/// Static priority rule.
///
/// Lower `priority` values run first. No aging: a low-priority job can
/// starve behind a steady stream of more important arrivals.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, job: &JobSpec) -> RuleScore {
        i64::from(job.priority)
    }
}
