//! Rule engine for multi-criteria dispatching.
//!
//! Composes dispatching rules lexicographically: the primary rule decides,
//! later rules only break its ties, and ascending job ID makes the order
//! total.

use std::cmp::Ordering;
use std::sync::Arc;

use super::DispatchingRule;
use crate::models::JobSpec;

/// A composable rule engine for job prioritization.
///
/// # Example
/// ```
/// use cpu_schedsim::dispatching::RuleEngine;
/// use cpu_schedsim::dispatching::rules;
/// use cpu_schedsim::models::JobSpec;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Sjf)
///     .with_tie_breaker(rules::Fifo);
///
/// let jobs = [JobSpec::new(1, 0, 5), JobSpec::new(2, 0, 2)];
/// assert_eq!(engine.select_best(&jobs), Some(1));
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds the primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted only when earlier rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Compares two jobs. `Less` means `a` runs first.
    ///
    /// Jobs the rules cannot separate are ordered by ascending ID.
    pub fn compare(&self, a: &JobSpec, b: &JobSpec) -> Ordering {
        for rule in &self.rules {
            let ordering = rule.evaluate(a).cmp(&rule.evaluate(b));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        a.id.cmp(&b.id)
    }

    /// Returns the position of the job that should run next.
    ///
    /// Between jobs sharing an ID the earliest position wins.
    pub fn select_best<'a, I>(&self, jobs: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a JobSpec>,
    {
        let mut best: Option<(usize, &JobSpec)> = None;
        for (idx, job) in jobs.into_iter().enumerate() {
            let better = match best {
                Some((_, current)) => self.compare(job, current) == Ordering::Less,
                None => true,
            };
            if better {
                best = Some((idx, job));
            }
        }
        best.map(|(idx, _)| idx)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
