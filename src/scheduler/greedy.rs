//! Priority-dispatch greedy constructors.
//!
//! # Algorithm
//!
//! 1. The dispatchable set starts with the first operation of every job.
//! 2. The rule engine picks one dispatchable operation (ties: first seen).
//! 3. The operation is appended to its machine's order and removed from
//!    the set; its job successor, if any, is appended to the set.
//! 4. Repeat until every operation is placed.
//!
//! Each dispatched operation starts at its earliest feasible start, which
//! is exactly where simulating the produced order would put it, so the
//! timed schedule is built alongside the order.
//!
//! # Complexity
//! O(n² · r) where n = operations and r = rules in the engine.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use std::time::Instant;

use super::Solver;
use crate::dispatching::{rules, DispatchContext, RuleEngine};
use crate::models::{ExitCause, Instance, Operation, ResourceOrder, Schedule, SolveResult};

/// Greedy constructor driven by a [`RuleEngine`].
///
/// # Example
///
/// ```
/// use std::time::Instant;
/// use jobshop_search::models::Instance;
/// use jobshop_search::scheduler::{GreedySolver, Solver};
///
/// let instance: Instance = "2 2\n0 3 1 2\n1 2 0 4\n".parse().unwrap();
/// let result = GreedySolver::spt().solve(&instance, Instant::now());
/// assert_eq!(result.makespan(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct GreedySolver {
    engine: RuleEngine,
}

impl GreedySolver {
    /// Creates a constructor from an arbitrary rule engine.
    pub fn new(engine: RuleEngine) -> Self {
        Self { engine }
    }

    /// Shortest processing time first.
    pub fn spt() -> Self {
        Self::new(RuleEngine::new().with_rule(rules::Spt))
    }

    /// Longest remaining job processing time first.
    pub fn lrpt() -> Self {
        Self::new(RuleEngine::new().with_rule(rules::Lrpt))
    }

    /// Earliest start first, ties to the shorter operation.
    pub fn est_spt() -> Self {
        Self::new(
            RuleEngine::new()
                .with_rule(rules::EarliestStart)
                .with_tie_breaker(rules::Spt),
        )
    }

    /// Earliest start first, ties to the longer remaining job.
    pub fn est_lrpt() -> Self {
        Self::new(
            RuleEngine::new()
                .with_rule(rules::EarliestStart)
                .with_tie_breaker(rules::Lrpt),
        )
    }

    /// The engine selecting operations.
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Builds a complete order and its timed schedule.
    pub fn construct<'a>(&self, instance: &'a Instance) -> (ResourceOrder<'a>, Schedule<'a>) {
        let ops_per_job = instance.num_machines;
        let mut order = ResourceOrder::new(instance);
        let mut context = DispatchContext::new(instance);
        let mut starts = vec![vec![0_i64; ops_per_job]; instance.num_jobs];

        let mut dispatchable: Vec<Operation> = if ops_per_job == 0 {
            Vec::new()
        } else {
            (0..instance.num_jobs).map(|j| Operation::new(j, 0)).collect()
        };

        while let Some(idx) = self.engine.select_best(&dispatchable, &context) {
            let op = dispatchable.remove(idx);
            starts[op.job][op.position] = context.record(op);
            order.push(op);
            if let Some(next) = op.successor(ops_per_job) {
                dispatchable.push(next);
            }
        }

        let sequences = (0..instance.num_machines)
            .map(|m| order.sequence(m).to_vec())
            .collect();
        let schedule = Schedule::new(instance, starts, sequences);
        (order, schedule)
    }
}

impl Solver for GreedySolver {
    fn name(&self) -> String {
        format!("greedy {}", self.engine.name())
    }

    /// Always runs to completion; the deadline is not consulted.
    fn solve<'a>(&self, instance: &'a Instance, _deadline: Instant) -> SolveResult<'a> {
        let (_, schedule) = self.construct(instance);
        tracing::debug!(
            rule = %self.engine.name(),
            makespan = schedule.makespan(),
            "greedy construction finished"
        );
        SolveResult::new(instance, schedule, ExitCause::Blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn toy() -> Instance {
        Instance::from_jobs(vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 4)]]).unwrap()
    }

    fn all_greedy() -> Vec<GreedySolver> {
        vec![
            GreedySolver::spt(),
            GreedySolver::lrpt(),
            GreedySolver::est_spt(),
            GreedySolver::est_lrpt(),
        ]
    }

    #[test]
    fn test_spt_toy_order() {
        let instance = toy();
        let (order, schedule) = GreedySolver::spt().construct(&instance);

        // (1,0) d2 beats (0,0) d3 when both are dispatchable
        assert_eq!(order.at(1, 0), Operation::new(1, 0));
        assert_eq!(
            order.sequence(0),
            &[Operation::new(0, 0), Operation::new(1, 1)]
        );
        assert_eq!(
            order.sequence(1),
            &[Operation::new(1, 0), Operation::new(0, 1)]
        );
        // m0: (0,0) 0-3, (1,1) 3-7; m1: (1,0) 0-2, (0,1) 3-5
        assert_eq!(schedule.makespan(), 7);
    }

    #[test]
    fn test_lrpt_toy_order() {
        let instance = toy();
        let (order, _) = GreedySolver::lrpt().construct(&instance);
        // job1 has 6 remaining vs 5 for job0
        assert_eq!(order.at(1, 0), Operation::new(1, 0));
        // then (1,1) (rem 4) vs (0,0) (rem 5): (0,0)
        assert_eq!(order.at(0, 0), Operation::new(0, 0));
    }

    #[test]
    fn test_est_spt_breaks_ties_by_duration() {
        let instance = toy();
        let (order, schedule) = GreedySolver::est_spt().construct(&instance);
        assert_eq!(order.at(1, 0), Operation::new(1, 0));
        assert_eq!(schedule.makespan(), 7);
    }

    #[test]
    fn test_est_lrpt_prefers_earlier_start() {
        // job0: m0 d1, m1 d1 | job1: m0 d5, m1 d5
        let instance =
            Instance::from_jobs(vec![vec![(0, 1), (1, 1)], vec![(0, 5), (1, 5)]]).unwrap();
        let (order, schedule) = GreedySolver::est_lrpt().construct(&instance);
        // both EST 0: LRPT picks job1 first on m0
        assert_eq!(order.sequence(0), &[Operation::new(1, 0), Operation::new(0, 0)]);
        // (1,1) can start at 5 and (0,0) at 5; tie -> job1 remaining 5 > 2
        assert_eq!(order.sequence(1), &[Operation::new(1, 1), Operation::new(0, 1)]);
        assert_eq!(schedule.makespan(), 11);
    }

    #[test]
    fn test_schedule_matches_simulation() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..5 {
            let instance = Instance::random(6, 5, 30, &mut rng);
            for solver in all_greedy() {
                let (order, schedule) = solver.construct(&instance);
                assert_eq!(order.to_schedule().as_ref(), Some(&schedule));
            }
        }
    }

    #[test]
    fn test_greedy_completeness() {
        let mut rng = SmallRng::seed_from_u64(11);
        let instance = Instance::random(8, 4, 50, &mut rng);
        for solver in all_greedy() {
            let (order, schedule) = solver.construct(&instance);
            assert!(order.is_complete());
            let mut seen: Vec<Operation> = (0..instance.num_machines)
                .flat_map(|m| order.sequence(m).to_vec())
                .collect();
            seen.sort();
            assert_eq!(seen, instance.operations().collect::<Vec<_>>());
            assert!(schedule.is_feasible());
        }
    }

    #[test]
    fn test_deterministic() {
        let mut rng = SmallRng::seed_from_u64(3);
        let instance = Instance::random(5, 5, 10, &mut rng);
        for solver in all_greedy() {
            let (a, _) = solver.construct(&instance);
            let (b, _) = solver.construct(&instance);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_solve_ignores_past_deadline() {
        let instance = toy();
        let result = GreedySolver::est_lrpt().solve(&instance, Instant::now());
        assert_eq!(result.exit_cause, ExitCause::Blocked);
        assert!(result.schedule.is_feasible());
        assert_eq!(GreedySolver::est_lrpt().name(), "greedy EST-LRPT");
    }
}
