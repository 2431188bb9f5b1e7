//! Single-CPU scheduling simulator.
//!
//! Computes the timing outcome of running a job set under a classical CPU
//! scheduling discipline and derives per-job and run-level metrics.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `JobSpec`, `JobRuntime`, `JobOutcome`,
//!   `ExecutionSlice`, `RunResult`
//! - **`dispatching`**: Dispatching rules, rule engine, and the `Policy` enum
//!   (FCFS, SJF, Priority, Round-Robin)
//! - **`scheduler`**: Ready-queue admission, the simulation driver, and
//!   `RunMetrics`
//! - **`validation`**: Input integrity checks (duplicate IDs, bursts,
//!   arrivals, priorities)
//! - **`workload`**: Seeded random job sets
//! - **`report`**: CSV export and text rendering of results
//! - **`preset`**: Named job sets persisted as JSON
//!
//! # Example
//!
//! ```
//! use cpu_schedsim::{simulate, JobSpec, Policy};
//!
//! let jobs = vec![
//!     JobSpec::new(1, 0, 8).with_priority(2),
//!     JobSpec::new(2, 1, 4).with_priority(1),
//! ];
//! let run = simulate(&jobs, Policy::RoundRobin { quantum: 4 }).unwrap();
//! assert_eq!(run.completion_order(), vec![2, 1]);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod dispatching;
pub mod error;
pub mod models;
pub mod preset;
pub mod report;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use dispatching::Policy;
pub use error::SimulationError;
pub use models::{JobOutcome, JobSpec, RunResult};
pub use scheduler::{compare, simulate, RunMetrics};
