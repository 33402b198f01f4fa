//! Rule engine for multi-criteria dispatching.
//!
//! Composes a primary dispatching rule with tie-breakers, evaluated
//! lexicographically.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchContext, DispatchingRule, RuleScore};
use crate::models::Operation;

/// A composable rule engine for operation selection.
///
/// Rules are applied in sequence; a later rule is consulted only when all
/// earlier rules tie. When every rule ties, the candidate seen first wins,
/// so selection is deterministic for a given dispatchable-set order.
///
/// # Example
/// ```
/// use jobshop_search::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::EarliestStart)
///     .with_tie_breaker(rules::Spt);
/// assert_eq!(engine.name(), "EST-SPT");
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds the primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted when all earlier rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Rule names joined by `-` (e.g. `"EST-LRPT"`).
    pub fn name(&self) -> String {
        self.rules
            .iter()
            .map(|r| r.name())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Returns the index of the highest-priority operation.
    ///
    /// Ties keep the earliest index. `None` when `candidates` is empty.
    pub fn select_best(
        &self,
        candidates: &[Operation],
        context: &DispatchContext<'_>,
    ) -> Option<usize> {
        // min_by keeps the first of equal elements
        (0..candidates.len()).min_by(|&a, &b| self.compare(candidates[a], candidates[b], context))
    }

    /// Evaluates a single operation and returns scores from each rule.
    pub fn evaluate(&self, op: Operation, context: &DispatchContext<'_>) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(op, context)).collect()
    }

    fn compare(&self, a: Operation, b: Operation, context: &DispatchContext<'_>) -> Ordering {
        for rule in &self.rules {
            match rule.evaluate(a, context).cmp(&rule.evaluate(b, context)) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        Ordering::Equal
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
