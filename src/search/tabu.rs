//! Tabu search over critical blocks.
//!
//! # Algorithm
//!
//! Each iteration extracts the critical blocks of the current order and
//! applies every allowed boundary swap in turn, with no improvement test.
//! After swapping operations `a` (first) and `b` (second), the reverse
//! move `(b, a)` is forbidden for `cool_down` iterations. The best order
//! ever seen is tracked separately and returned.
//!
//! The search stops at the deadline, after `max_iterations` iterations, or
//! once `max_stall` consecutive applied moves fail to beat the best.
//!
//! # Reference
//! Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the Job
//! Shop Problem"

use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{critical_blocks, has_time_left, Improvement, SearchStats};
use crate::models::{ExitCause, Instance, ResourceOrder, Schedule, SolveResult};
use crate::scheduler::{GreedySolver, Solver};

/// Tabu search parameters.
///
/// Missing fields take their default when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabuConfig {
    /// Iteration cap (default: 3000).
    pub max_iterations: usize,
    /// Consecutive non-improving moves tolerated (default: 50).
    pub max_stall: usize,
    /// Iterations a reversed move stays forbidden (default: 4).
    pub cool_down: usize,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 3000,
            max_stall: 50,
            cool_down: 4,
        }
    }
}

impl TabuConfig {
    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the stall limit.
    pub fn with_max_stall(mut self, max_stall: usize) -> Self {
        self.max_stall = max_stall;
        self
    }

    /// Sets the cool-down length.
    pub fn with_cool_down(mut self, cool_down: usize) -> Self {
        self.cool_down = cool_down;
        self
    }
}

/// Forbidden-move table keyed by ordered pairs of operation indices.
///
/// Entry `(a, b)` is the first iteration at which swapping `a` (first)
/// with `b` (second) is allowed again.
#[derive(Debug, Clone)]
struct TabuTable {
    num_ops: usize,
    allowed_from: Vec<usize>,
}

impl TabuTable {
    fn new(num_ops: usize) -> Self {
        Self {
            num_ops,
            allowed_from: vec![0; num_ops * num_ops],
        }
    }

    #[inline]
    fn is_allowed(&self, a: usize, b: usize, iteration: usize) -> bool {
        self.allowed_from[a * self.num_ops + b] <= iteration
    }

    #[inline]
    fn forbid_until(&mut self, a: usize, b: usize, iteration: usize) {
        self.allowed_from[a * self.num_ops + b] = iteration;
    }
}

/// Always-accept local search with a short-term memory.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use jobshop_search::models::Instance;
/// use jobshop_search::scheduler::Solver;
/// use jobshop_search::search::{TabuConfig, TabuSolver};
///
/// let instance: Instance = "2 2\n0 3 1 2\n1 2 0 4\n".parse().unwrap();
/// let solver = TabuSolver::new(TabuConfig::default().with_max_iterations(100));
/// let result = solver.solve(&instance, Instant::now() + Duration::from_secs(1));
/// assert_eq!(result.makespan(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct TabuSolver {
    config: TabuConfig,
    seed: GreedySolver,
}

impl TabuSolver {
    /// Creates a tabu solver seeded by EST-LRPT.
    pub fn new(config: TabuConfig) -> Self {
        Self {
            config,
            seed: GreedySolver::est_lrpt(),
        }
    }

    /// Replaces the seeding constructor.
    pub fn with_seed(mut self, seed: GreedySolver) -> Self {
        self.seed = seed;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &TabuConfig {
        &self.config
    }

    /// Runs tabu search from `order` and returns the best order visited.
    ///
    /// `schedule` must be the simulation of `order`.
    pub fn improve<'a>(
        &self,
        order: ResourceOrder<'a>,
        schedule: Schedule<'a>,
        deadline: Instant,
    ) -> Improvement<'a> {
        let instance = order.instance();
        let TabuConfig {
            max_iterations,
            max_stall,
            cool_down,
        } = self.config;

        let mut best = order.clone();
        let mut best_schedule = schedule.clone();
        let mut current = order;
        let mut current_schedule = schedule;

        let mut table = TabuTable::new(instance.num_operations());
        let mut stats = SearchStats::default();
        let mut k = 0;
        let mut stall = 0;

        while has_time_left(deadline) && k < max_iterations && stall < max_stall {
            k += 1;
            stats.iterations = k;
            let blocks = critical_blocks(&current, &current_schedule);
            tracing::trace!(
                iteration = k,
                makespan = current_schedule.makespan(),
                blocks = blocks.len(),
                "tabu iteration"
            );

            for block in &blocks {
                for swap in block.neighbors() {
                    let a = instance.op_index(current.at(swap.machine, swap.t1));
                    let b = instance.op_index(current.at(swap.machine, swap.t2));
                    if !table.is_allowed(a, b, k) {
                        continue;
                    }

                    let mut candidate = current.clone();
                    swap.apply_on(&mut candidate);
                    let Some(candidate_schedule) = candidate.to_schedule() else {
                        tracing::trace!(?swap, "skipping deadlocked candidate");
                        continue;
                    };
                    current = candidate;
                    current_schedule = candidate_schedule;
                    stats.history.push(current_schedule.makespan());

                    if current_schedule.makespan() < best_schedule.makespan() {
                        tracing::debug!(
                            iteration = k,
                            from = best_schedule.makespan(),
                            to = current_schedule.makespan(),
                            "tabu new best"
                        );
                        best = current.clone();
                        best_schedule = current_schedule.clone();
                        stats.improvements += 1;
                        stall = 0;
                    } else {
                        stall += 1;
                    }
                    table.forbid_until(b, a, k + cool_down);
                }
            }
        }

        Improvement {
            order: best,
            schedule: best_schedule,
            stats,
        }
    }
}

impl Default for TabuSolver {
    fn default() -> Self {
        Self::new(TabuConfig::default())
    }
}

impl Solver for TabuSolver {
    fn name(&self) -> String {
        "tabu".to_string()
    }

    #[tracing::instrument(level = "debug", name = "Tabu Search", skip_all, fields(jobs = instance.num_jobs, machines = instance.num_machines))]
    fn solve<'a>(&self, instance: &'a Instance, deadline: Instant) -> SolveResult<'a> {
        let (_, seed_schedule) = self.seed.construct(instance);
        let seed_makespan = seed_schedule.makespan();
        let order = ResourceOrder::from_schedule(&seed_schedule);

        let Improvement {
            schedule, stats, ..
        } = self.improve(order, seed_schedule, deadline);
        tracing::debug!(
            seed = seed_makespan,
            best = schedule.makespan(),
            iterations = stats.iterations,
            improvements = stats.improvements,
            "tabu finished"
        );
        SolveResult::new(instance, schedule, ExitCause::Blocked)
    }
}
