//! Dispatching rules, rule engine, and scheduling policies.
//!
//! Rules score a single job; the rule engine chains rules into a total
//! order; a [`Policy`] uses that order (or plain FIFO with a quantum) to
//! decide what runs next.
//!
//! # Usage
//!
//! ```
//! use cpu_schedsim::dispatching::RuleEngine;
//! use cpu_schedsim::dispatching::rules;
//! use cpu_schedsim::models::JobSpec;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Sjf)
//!     .with_tie_breaker(rules::Fifo);
//!
//! let jobs = vec![JobSpec::new(1, 0, 8), JobSpec::new(2, 1, 4)];
//! assert_eq!(engine.select_best(&jobs), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
mod policy;
pub mod rules;

pub use engine::RuleEngine;
pub use policy::{Dispatch, Policy};

use crate::models::JobSpec;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = i64;

/// A dispatching rule that evaluates job priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for jobs that should run first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "FIFO").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a job.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, job: &JobSpec) -> RuleScore;
}
