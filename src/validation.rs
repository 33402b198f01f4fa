//! Input and solution validation for job-shop problems.
//!
//! Checks the structural integrity of an instance before solving:
//! - At least one job and one machine
//! - Every job has one operation per machine
//! - Machine ids are in range and each job visits each machine once
//! - Durations are non-negative
//!
//! and the feasibility of a timed schedule:
//! - Job precedence (each operation starts after its job predecessor ends)
//! - Machine exclusivity (no two operations overlap on a machine)
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 7.1

use std::fmt;

use crate::models::{Instance, Operation, Schedule};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The instance has no jobs or no machines.
    EmptyInstance,
    /// A job's operation count differs from the machine count.
    JobLengthMismatch,
    /// An operation references a machine id `>= num_machines`.
    MachineOutOfRange,
    /// A job visits the same machine twice.
    MachineRevisited,
    /// An operation has a negative duration.
    NegativeDuration,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates an instance.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &Instance) -> ValidationResult {
    let mut errors = Vec::new();

    if instance.num_jobs == 0 || instance.num_machines == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            format!(
                "Instance has no jobs or no machines ({} jobs, {} machines)",
                instance.num_jobs, instance.num_machines
            ),
        ));
    }

    if instance.machines.len() != instance.num_jobs || instance.durations.len() != instance.num_jobs
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::JobLengthMismatch,
            format!(
                "Expected {} jobs, found {} machine rows and {} duration rows",
                instance.num_jobs,
                instance.machines.len(),
                instance.durations.len()
            ),
        ));
        return Err(errors);
    }

    for (job, (machines, durations)) in instance
        .machines
        .iter()
        .zip(&instance.durations)
        .enumerate()
    {
        if machines.len() != instance.num_machines || durations.len() != instance.num_machines {
            errors.push(ValidationError::new(
                ValidationErrorKind::JobLengthMismatch,
                format!(
                    "Job {job} has {} operations, expected {}",
                    machines.len(),
                    instance.num_machines
                ),
            ));
            continue;
        }

        let mut seen = vec![false; instance.num_machines];
        for (position, &machine) in machines.iter().enumerate() {
            if machine >= instance.num_machines {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MachineOutOfRange,
                    format!("Operation ({job},{position}) uses unknown machine {machine}"),
                ));
            } else if std::mem::replace(&mut seen[machine], true) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MachineRevisited,
                    format!("Job {job} visits machine {machine} more than once"),
                ));
            }
        }

        for (position, &duration) in durations.iter().enumerate() {
            if duration < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeDuration,
                    format!("Operation ({job},{position}) has negative duration {duration}"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A constraint violation in a timed schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// The operation at fault.
    pub operation: Operation,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationType {
    /// Operation started before its job predecessor finished.
    PrecedenceViolation,
    /// Operation overlaps the next operation on its machine.
    MachineOverlap,
    /// Operation is missing from its machine sequence.
    MissingOperation,
}

/// Checks job precedence and machine exclusivity of a schedule.
pub fn validate_schedule(schedule: &Schedule<'_>) -> Result<(), Vec<Violation>> {
    let instance = schedule.instance();
    let mut violations = Vec::new();

    for op in instance.operations() {
        if let Some(pred) = op.predecessor() {
            if schedule.start(op) < schedule.end(pred) {
                violations.push(Violation {
                    violation_type: ViolationType::PrecedenceViolation,
                    operation: op,
                    message: format!(
                        "{op} starts at {} before {pred} ends at {}",
                        schedule.start(op),
                        schedule.end(pred)
                    ),
                });
            }
        }
        if !schedule.sequence(instance.machine(op)).contains(&op) {
            violations.push(Violation {
                violation_type: ViolationType::MissingOperation,
                operation: op,
                message: format!("{op} is not sequenced on machine {}", instance.machine(op)),
            });
        }
    }

    for machine in 0..instance.num_machines {
        let mut ops = schedule.sequence(machine).to_vec();
        ops.sort_by_key(|&op| (schedule.start(op), schedule.end(op)));
        for w in ops.windows(2) {
            if schedule.start(w[1]) < schedule.end(w[0]) {
                violations.push(Violation {
                    violation_type: ViolationType::MachineOverlap,
                    operation: w[0],
                    message: format!("{} overlaps {} on machine {machine}", w[0], w[1]),
                });
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
