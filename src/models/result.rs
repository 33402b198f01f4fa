//! Solver output.

use serde::{Deserialize, Serialize};

use super::{Instance, Schedule};

/// Why a solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitCause {
    /// The returned schedule is proven optimal.
    ProvedOptimal,
    /// The wall-clock deadline expired.
    Timeout,
    /// The search ran out of budget, iterations or improving moves.
    Blocked,
}

/// Result of a [`Solver`] run.
///
/// [`Solver`]: crate::scheduler::Solver
#[derive(Debug, Clone)]
pub struct SolveResult<'a> {
    /// The solved instance.
    pub instance: &'a Instance,
    /// Best schedule found.
    pub schedule: Schedule<'a>,
    /// Termination reason.
    pub exit_cause: ExitCause,
}

impl<'a> SolveResult<'a> {
    /// Creates a result.
    pub fn new(instance: &'a Instance, schedule: Schedule<'a>, exit_cause: ExitCause) -> Self {
        Self {
            instance,
            schedule,
            exit_cause,
        }
    }

    /// Makespan of the returned schedule.
    #[inline]
    pub fn makespan(&self) -> i64 {
        self.schedule.makespan()
    }
}
