//! Input validation for job sets.
//!
//! Checks structural integrity of jobs before simulation. Detects:
//! - Duplicate IDs
//! - Non-positive burst times
//! - Negative arrival times
//! - Negative priorities
//! - Job sets whose schedule could run past `i64::MAX`
//!
//! Every issue is reported, not just the first one found.

use crate::models::{JobId, JobSpec};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending job.
    pub job_id: JobId,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two jobs share the same ID.
    DuplicateId,
    /// Burst time is zero or negative.
    NonPositiveBurst,
    /// Arrival time is before the epoch.
    NegativeArrival,
    /// Priority is negative.
    NegativePriority,
    /// Latest arrival plus total burst does not fit in an `i64` tick.
    HorizonOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, job_id: JobId, message: impl Into<String>) -> Self {
        Self {
            kind,
            job_id,
            message: message.into(),
        }
    }
}

/// Validates a job set.
///
/// Checks:
/// 1. No duplicate job IDs
/// 2. `burst_time > 0`
/// 3. `arrival_time >= 0`
/// 4. `priority >= 0`
/// 5. Latest arrival + sum of bursts fits in an `i64`
///
/// No run can end later than check 5's bound, so a set that passes never
/// overflows the simulation clock.
///
/// An empty slice is valid here; emptiness is the simulator's concern.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[JobSpec]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for job in jobs {
        if !ids.insert(job.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                job.id,
                format!("Duplicate job ID: P{}", job.id),
            ));
        }

        if job.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                job.id,
                format!(
                    "Job P{} has non-positive burst time {}",
                    job.id, job.burst_time
                ),
            ));
        }

        if job.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                job.id,
                format!(
                    "Job P{} has negative arrival time {}",
                    job.id, job.arrival_time
                ),
            ));
        }

        if job.priority < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativePriority,
                job.id,
                format!("Job P{} has negative priority {}", job.id, job.priority),
            ));
        }
    }

    if let Some(job) = horizon_overflow(jobs) {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            job.id,
            format!(
                "Job P{} pushes the schedule past the largest representable tick",
                job.id
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Returns the job whose burst first overflows `max arrival + total burst`.
fn horizon_overflow(jobs: &[JobSpec]) -> Option<&JobSpec> {
    let latest = jobs.iter().map(|j| j.arrival_time.max(0)).max()?;
    let mut horizon = latest;
    for job in jobs {
        match horizon.checked_add(job.burst_time.max(0)) {
            Some(next) => horizon = next,
            None => return Some(job),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_jobs() -> Vec<JobSpec> {
        vec![
            JobSpec::new(1, 0, 8).with_priority(2),
            JobSpec::new(2, 1, 4).with_priority(1),
            JobSpec::new(3, 2, 9).with_priority(3),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_jobs(&sample_jobs()).is_ok());
    }

    #[test]
    fn test_empty_is_structurally_valid() {
        assert!(validate_jobs(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let mut jobs = sample_jobs();
        jobs.push(JobSpec::new(2, 5, 1));
        let errors = validate_jobs(&jobs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert_eq!(errors[0].job_id, 2);
    }

    #[test]
    fn test_zero_burst() {
        let jobs = vec![JobSpec::new(1, 0, 0)];
        let errors = validate_jobs(&jobs).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveBurst);
    }

    #[test]
    fn test_negative_fields() {
        let jobs = vec![JobSpec::new(1, -1, 3).with_priority(-2)];
        let errors = validate_jobs(&jobs).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::NegativeArrival,
                ValidationErrorKind::NegativePriority
            ]
        );
    }

    #[test]
    fn test_collects_all_errors() {
        let jobs = vec![
            JobSpec::new(1, 0, 0),
            JobSpec::new(1, -3, 2),
            JobSpec::new(2, 0, -5),
        ];
        let errors = validate_jobs(&jobs).unwrap_err();
        // burst(1), duplicate(1) + arrival(1), burst(2)
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_late_arrival_overflows_horizon() {
        let jobs = vec![JobSpec::new(1, i64::MAX - 1, 5)];
        let errors = validate_jobs(&jobs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::HorizonOverflow);
        assert_eq!(errors[0].job_id, 1);
    }

    #[test]
    fn test_total_burst_overflows_horizon() {
        let jobs = vec![
            JobSpec::new(1, 0, i64::MAX / 2 + 1),
            JobSpec::new(2, 0, i64::MAX / 2 + 1),
        ];
        let errors = validate_jobs(&jobs).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::HorizonOverflow);
        assert_eq!(errors[0].job_id, 2);
    }

    #[test]
    fn test_horizon_at_limit_is_valid() {
        let jobs = vec![JobSpec::new(1, i64::MAX - 5, 5)];
        assert!(validate_jobs(&jobs).is_ok());
    }
}
