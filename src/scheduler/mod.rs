//! Solver abstraction, greedy constructors and the solver registry.
//!
//! Every strategy in this crate implements [`Solver`]: given an instance
//! and a wall-clock deadline it returns the best schedule it found.
//!
//! | Name | Strategy |
//! |------|----------|
//! | `spt` | Greedy, shortest processing time |
//! | `lrpt` | Greedy, longest remaining processing time |
//! | `est_spt` | Greedy, earliest start then SPT |
//! | `est_lrpt` | Greedy, earliest start then LRPT |
//! | `descent` | Critical-block steepest descent |
//! | `tabu` | Critical-block tabu search |
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4, 7
//! - Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the Job Shop Problem"

mod greedy;

pub use greedy::GreedySolver;

use std::fmt::Debug;
use std::time::Instant;

use crate::models::{Instance, SolveResult};
use crate::search::{DescentSolver, TabuSolver};

/// A job-shop solving strategy.
///
/// Implementations must return promptly once `deadline` has passed and
/// must always produce a feasible schedule, even with no time left.
pub trait Solver: Send + Sync + Debug {
    /// Human-readable strategy name.
    fn name(&self) -> String;

    /// Solves `instance`, stopping at `deadline`.
    fn solve<'a>(&self, instance: &'a Instance, deadline: Instant) -> SolveResult<'a>;
}

/// Names accepted by [`solver_by_name`].
pub const SOLVER_NAMES: [&str; 6] = ["spt", "lrpt", "est_spt", "est_lrpt", "descent", "tabu"];

/// Looks up a solver with default configuration by name.
pub fn solver_by_name(name: &str) -> Option<Box<dyn Solver>> {
    let solver: Box<dyn Solver> = match name {
        "spt" => Box::new(GreedySolver::spt()),
        "lrpt" => Box::new(GreedySolver::lrpt()),
        "est_spt" => Box::new(GreedySolver::est_spt()),
        "est_lrpt" => Box::new(GreedySolver::est_lrpt()),
        "descent" => Box::new(DescentSolver::new()),
        "tabu" => Box::new(TabuSolver::default()),
        _ => return None,
    };
    Some(solver)
}
