//! Simulation error types.

use crate::validation::ValidationError;

/// Errors reported synchronously by the simulator.
///
/// None of these leave partial state behind: the engine only ever works on
/// private copies of the input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// No jobs were supplied; averages would be undefined.
    #[error("job set is empty")]
    EmptyJobSet,

    /// One or more jobs failed validation.
    #[error("invalid job set: {}", join_messages(.0))]
    InvalidJob(Vec<ValidationError>),

    /// Round-Robin was requested without a positive time quantum.
    #[error("round robin requires a positive time quantum, got {}", describe_quantum(.0))]
    InvalidQuantum(Option<i64>),

    /// The policy name is not one of `fcfs`, `sjf`, `priority`, `rr`.
    #[error("unknown scheduling policy '{0}'")]
    UnknownPolicy(String),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe_quantum(quantum: &Option<i64>) -> String {
    match quantum {
        Some(q) => q.to_string(),
        None => "none".to_string(),
    }
}
