//! Critical-block local search.
//!
//! Both solvers start from the EST-LRPT greedy order and move through the
//! Nowicki–Smutnicki neighborhood (see [`neighborhood`]):
//!
//! - [`DescentSolver`] accepts only strict improvements and stops at a
//!   local optimum.
//! - [`TabuSolver`] accepts every allowed move, forbids reversing recent
//!   moves for a few iterations, and keeps the best order it has seen.
//!
//! Both check the deadline once per sweep/iteration and return the best
//! order found so far when it expires.

mod descent;
pub mod neighborhood;
mod tabu;

pub use descent::DescentSolver;
pub use neighborhood::{critical_blocks, Block, Swap};
pub use tabu::{TabuConfig, TabuSolver};

use std::time::{Duration, Instant};

use crate::models::{ResourceOrder, Schedule};

/// Margin kept before the deadline when deciding to start more work.
const DEADLINE_SLACK: Duration = Duration::from_millis(1);

/// Whether there is time left to start another sweep or iteration.
#[inline]
pub(crate) fn has_time_left(deadline: Instant) -> bool {
    Instant::now() + DEADLINE_SLACK < deadline
}

/// Counters collected during one local-search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Sweeps (descent) or iterations (tabu) started.
    pub iterations: usize,
    /// Number of times the best makespan strictly improved.
    pub improvements: usize,
    /// Makespan of the current order after each sweep (descent) or each
    /// applied move (tabu).
    pub history: Vec<i64>,
}

/// Outcome of improving a starting order.
#[derive(Debug, Clone)]
pub struct Improvement<'a> {
    /// Best order found.
    pub order: ResourceOrder<'a>,
    /// Its simulated schedule.
    pub schedule: Schedule<'a>,
    /// Run counters.
    pub stats: SearchStats,
}
