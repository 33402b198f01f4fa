//! First-improvement descent over critical blocks.
//!
//! # Algorithm
//!
//! 1. Seed with a greedy order (EST-LRPT by default).
//! 2. Sweep: extract the critical blocks of the current order; for every
//!    block and every boundary swap, simulate a copy of the current order
//!    with the swap applied. A strictly shorter makespan replaces the
//!    current order at once, so later swaps in the sweep are compared
//!    against it.
//! 3. Stop when a sweep leaves the order unchanged or the deadline passes.

use std::time::Instant;

use super::{critical_blocks, has_time_left, Improvement, SearchStats};
use crate::models::{ExitCause, Instance, ResourceOrder, Schedule, SolveResult};
use crate::scheduler::{GreedySolver, Solver};

/// Greedy-accept local search.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use jobshop_search::models::Instance;
/// use jobshop_search::scheduler::Solver;
/// use jobshop_search::search::DescentSolver;
///
/// let instance: Instance = "2 2\n0 3 1 2\n1 2 0 4\n".parse().unwrap();
/// let deadline = Instant::now() + Duration::from_secs(1);
/// let result = DescentSolver::new().solve(&instance, deadline);
/// assert_eq!(result.makespan(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct DescentSolver {
    seed: GreedySolver,
}

impl DescentSolver {
    /// Creates a descent solver seeded by EST-LRPT.
    pub fn new() -> Self {
        Self {
            seed: GreedySolver::est_lrpt(),
        }
    }

    /// Replaces the seeding constructor.
    pub fn with_seed(mut self, seed: GreedySolver) -> Self {
        self.seed = seed;
        self
    }

    /// Descends from `order` until a local optimum or the deadline.
    ///
    /// `schedule` must be the simulation of `order`.
    pub fn improve<'a>(
        &self,
        order: ResourceOrder<'a>,
        schedule: Schedule<'a>,
        deadline: Instant,
    ) -> Improvement<'a> {
        let mut current = order;
        let mut current_schedule = schedule;
        let mut stats = SearchStats::default();

        while has_time_left(deadline) {
            stats.iterations += 1;
            let sweep_start = current.clone();
            let blocks = critical_blocks(&current, &current_schedule);

            for block in &blocks {
                for swap in block.neighbors() {
                    let mut candidate = current.clone();
                    swap.apply_on(&mut candidate);
                    let Some(candidate_schedule) = candidate.to_schedule() else {
                        tracing::trace!(?swap, "skipping deadlocked candidate");
                        continue;
                    };
                    if candidate_schedule.makespan() < current_schedule.makespan() {
                        tracing::debug!(
                            sweep = stats.iterations,
                            from = current_schedule.makespan(),
                            to = candidate_schedule.makespan(),
                            "descent improved"
                        );
                        stats.improvements += 1;
                        current = candidate;
                        current_schedule = candidate_schedule;
                    }
                }
            }

            stats.history.push(current_schedule.makespan());
            if current == sweep_start {
                break;
            }
        }

        Improvement {
            order: current,
            schedule: current_schedule,
            stats,
        }
    }
}

impl Default for DescentSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for DescentSolver {
    fn name(&self) -> String {
        "descent".to_string()
    }

    #[tracing::instrument(level = "debug", name = "Descent", skip_all, fields(jobs = instance.num_jobs, machines = instance.num_machines))]
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
            sweeps = stats.iterations,
            improvements = stats.improvements,
            "descent finished"
        );
        SolveResult::new(instance, schedule, ExitCause::Blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Operation;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn far_deadline() -> Instant {
        Instant::now() + Duration::from_secs(5)
    }

    #[test]
    fn test_toy_stays_optimal() {
        let instance =
            Instance::from_jobs(vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 4)]]).unwrap();
        let spt = GreedySolver::spt().solve(&instance, Instant::now());
        assert_eq!(spt.makespan(), 7);

        let order = ResourceOrder::from_schedule(&spt.schedule);
        let improved = DescentSolver::new().improve(order, spt.schedule.clone(), far_deadline());
        assert_eq!(improved.schedule.makespan(), 7);
        assert_eq!(improved.stats.improvements, 0);
        assert_eq!(improved.stats.iterations, 1);
    }

    #[test]
    fn test_improves_bad_start() {
        let instance =
            Instance::from_jobs(vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 4)]]).unwrap();
        // m0: (1,1) (0,0); m1: (1,0) (0,1)
        let mut order = ResourceOrder::new(&instance);
        for (j, p) in [(1, 1), (0, 0), (1, 0), (0, 1)] {
            order.push(Operation::new(j, p));
        }
        let schedule = order.to_schedule().unwrap();
        // (1,0) 0-2, (1,1) 2-6, (0,0) 6-9, (0,1) 9-11
        assert_eq!(schedule.makespan(), 11);

        let improved = DescentSolver::new().improve(order, schedule, far_deadline());
        assert_eq!(improved.schedule.makespan(), 7);
        assert_eq!(improved.stats.improvements, 1);
        assert_eq!(improved.stats.history, vec![7, 7]);
        assert_eq!(improved.order.at(0, 0), Operation::new(0, 0));
        assert!(improved.schedule.is_feasible());
    }

    #[test]
    fn test_monotone_sweeps() {
        let mut rng = SmallRng::seed_from_u64(31);
        for _ in 0..5 {
            let instance = Instance::random(10, 5, 40, &mut rng);
            let (_, seed) = GreedySolver::est_lrpt().construct(&instance);
            let seed_makespan = seed.makespan();
            let order = ResourceOrder::from_schedule(&seed);
            let improved = DescentSolver::new().improve(order, seed, far_deadline());

            let history = &improved.stats.history;
            assert!(history.windows(2).all(|w| w[1] <= w[0]));
            assert!(history.iter().all(|&m| m <= seed_makespan));
            assert!(improved.schedule.makespan() <= seed_makespan);
            assert_eq!(improved.order.to_schedule().as_ref(), Some(&improved.schedule));
        }
    }

    #[test]
    fn test_past_deadline_returns_seed() {
        let mut rng = SmallRng::seed_from_u64(8);
        let instance = Instance::random(6, 6, 20, &mut rng);
        let seed = GreedySolver::est_lrpt().solve(&instance, Instant::now());
        let result = DescentSolver::new().solve(&instance, Instant::now());
        assert_eq!(result.makespan(), seed.makespan());
        assert_eq!(result.exit_cause, ExitCause::Blocked);
    }
}
