//! Scheduling policies.
//!
//! A closed set of disciplines. Each answers the same question: given the
//! ready queue, which job runs next and for how long.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{rules, RuleEngine};
use crate::error::SimulationError;
use crate::models::JobRuntime;

/// A CPU scheduling discipline.
///
/// # Example
/// ```
/// use cpu_schedsim::dispatching::Policy;
///
/// let rr = Policy::from_name("rr", Some(4)).unwrap();
/// assert_eq!(rr, Policy::RoundRobin { quantum: 4 });
/// assert_eq!(rr.to_string(), "RR(Q=4)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Policy {
    /// First-Come-First-Served, non-preemptive.
    Fcfs,
    /// Shortest-Job-First, non-preemptive.
    Sjf,
    /// Static priority (lower value first), non-preemptive.
    Priority,
    /// Round-Robin with a fixed time quantum, preemptive.
    RoundRobin {
        /// Maximum ticks per dispatch.
        quantum: i64,
    },
}

/// A dispatch decision: run the job at `index` for `slice` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Position in the ready queue.
    pub index: usize,
    /// Ticks to run before the job completes or is preempted.
    pub slice: i64,
}

impl Policy {
    /// Builds a policy from its name.
    ///
    /// Accepts `fcfs`, `sjf`, `priority`, `rr` / `round_robin` (any case).
    /// `quantum` is required for Round-Robin and ignored otherwise.
    pub fn from_name(name: &str, quantum: Option<i64>) -> Result<Self, SimulationError> {
        let policy = match name.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Policy::Fcfs,
            "sjf" => Policy::Sjf,
            "priority" => Policy::Priority,
            "rr" | "round_robin" | "round-robin" => match quantum {
                Some(q) => Policy::round_robin(q)?,
                None => return Err(SimulationError::InvalidQuantum(None)),
            },
            _ => return Err(SimulationError::UnknownPolicy(name.to_string())),
        };
        Ok(policy)
    }

    /// Builds a Round-Robin policy, rejecting non-positive quanta.
    pub fn round_robin(quantum: i64) -> Result<Self, SimulationError> {
        if quantum <= 0 {
            return Err(SimulationError::InvalidQuantum(Some(quantum)));
        }
        Ok(Policy::RoundRobin { quantum })
    }

    /// All four policies, Round-Robin using `quantum`.
    pub fn all(quantum: i64) -> Result<[Policy; 4], SimulationError> {
        Ok([
            Policy::Fcfs,
            Policy::Sjf,
            Policy::Priority,
            Policy::round_robin(quantum)?,
        ])
    }

    /// Whether a running job can lose the CPU before finishing.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Policy::RoundRobin { .. })
    }

    /// Time quantum, for Round-Robin.
    pub fn quantum(&self) -> Option<i64> {
        match self {
            Policy::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// Checks parameters of a policy built without [`Policy::round_robin`].
    pub fn validate(&self) -> Result<(), SimulationError> {
        match self {
            Policy::RoundRobin { quantum } if *quantum <= 0 => {
                Err(SimulationError::InvalidQuantum(Some(*quantum)))
            }
            _ => Ok(()),
        }
    }

    /// Selection rules for the non-preemptive policies.
    ///
    /// Every chain ends in arrival order then job ID, so the choice is
    /// always unique.
    pub fn rule_engine(&self) -> Option<RuleEngine> {
        let engine = match self {
            Policy::Fcfs => RuleEngine::new().with_rule(rules::Fifo),
            Policy::Sjf => RuleEngine::new()
                .with_rule(rules::Sjf)
                .with_tie_breaker(rules::Fifo),
            Policy::Priority => RuleEngine::new()
                .with_rule(rules::Priority)
                .with_tie_breaker(rules::Fifo),
            Policy::RoundRobin { .. } => return None,
        };
        Some(engine)
    }

    /// Chooses the next job to run from the ready queue.
    ///
    /// Non-preemptive policies pick by their rule chain and run the job to
    /// completion. Round-Robin takes the queue head for at most one quantum.
    /// Returns `None` when the queue is empty.
    pub fn select_next(
        &self,
        engine: Option<&RuleEngine>,
        ready: &VecDeque<JobRuntime>,
    ) -> Option<Dispatch> {
        match (self, engine) {
            (Policy::RoundRobin { quantum }, _) => ready.front().map(|head| Dispatch {
                index: 0,
                slice: head.remaining_time.min(*quantum),
            }),
            (_, Some(engine)) => engine
                .select_best(ready.iter().map(|rt| &rt.spec))
                .map(|index| Dispatch {
                    index,
                    slice: ready[index].remaining_time,
                }),
            (_, None) => ready.front().map(|head| Dispatch {
                index: 0,
                slice: head.remaining_time,
            }),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "FCFS"),
            Policy::Sjf => write!(f, "SJF"),
            Policy::Priority => write!(f, "Priority"),
            Policy::RoundRobin { quantum } => write!(f, "RR(Q={quantum})"),
        }
    }
}
