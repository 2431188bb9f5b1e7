//! CPU scheduling domain models.
//!
//! Provides the input job record, the per-run mutable runtime record, and
//! the result types a simulation produces.
//!
//! # Lifecycle
//!
//! | Type | Created | Mutated | Discarded |
//! |------|---------|---------|-----------|
//! | `JobSpec` | by the caller | never | by the caller |
//! | `JobRuntime` | at run start | during the run | when its outcome is produced |
//! | `RunResult` | at run end | never | by the caller |

mod job;
mod run;
mod runtime;

pub use job::{JobId, JobSpec, PriorityClass};
pub use run::{ExecutionSlice, JobOutcome, RunResult};
pub use runtime::{JobRuntime, JobState};
