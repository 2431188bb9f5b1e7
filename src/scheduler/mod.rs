//! Simulation driver, ready-queue admission, and run metrics.
//!
//! # Algorithm
//!
//! `Simulator` runs one deterministic pass per invocation: admission moves
//! arrived jobs into the ready queue, the policy picks what runs next, and
//! the clock advances by each slice or jumps over idle gaps.
//!
//! # KPI
//!
//! `RunMetrics` computes average turnaround, waiting and response times,
//! throughput, and CPU utilization over the simulated elapsed time.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1.2

mod admission;
mod kpi;
mod simulator;

pub use admission::ArrivalQueue;
pub use kpi::RunMetrics;
pub use simulator::{compare, simulate, SimulationRequest, Simulator};
