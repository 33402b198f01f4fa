//! Built-in dispatching rules.
//!
//! - **SPT**: shortest operation first
//! - **LRPT**: longest remaining job processing time first
//! - **EST**: earliest feasible start first
//!
//! # Score Convention
//! All rules return lower scores for higher priority operations.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use super::{DispatchContext, DispatchingRule, RuleScore};
use crate::models::Operation;

/// Shortest Processing Time.
///
/// Prioritizes the operation with the shortest duration.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, op: Operation, context: &DispatchContext<'_>) -> RuleScore {
        context.instance().duration(op)
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Longest Remaining Processing Time.
///
/// Prioritizes the operation whose job has the most work left, counting
/// the operation itself and every later operation of the job.
#[derive(Debug, Clone, Copy)]
pub struct Lrpt;

impl DispatchingRule for Lrpt {
    fn name(&self) -> &'static str {
        "LRPT"
    }

    fn evaluate(&self, op: Operation, context: &DispatchContext<'_>) -> RuleScore {
        -context.remaining_work(op)
    }

    fn description(&self) -> &'static str {
        "Longest Remaining Processing Time"
    }
}

/// Earliest Start Time.
///
/// Prioritizes the operation that can start soonest given the completion
/// times of its job and its machine so far.
#[derive(Debug, Clone, Copy)]
pub struct EarliestStart;

impl DispatchingRule for EarliestStart {
    fn name(&self) -> &'static str {
        "EST"
    }

    fn evaluate(&self, op: Operation, context: &DispatchContext<'_>) -> RuleScore {
        context.earliest_start(op)
    }

    fn description(&self) -> &'static str {
        "Earliest Start Time"
    }
}
