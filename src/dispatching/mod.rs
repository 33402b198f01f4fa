//! Dispatching rules and rule engine for greedy construction.
//!
//! Provides the priority rules used to pick the next operation among the
//! currently dispatchable ones (SPT, LRPT, EST) and a rule engine that
//! chains a primary rule with tie-breakers.
//!
//! # Usage
//!
//! ```
//! use jobshop_search::dispatching::{rules, RuleEngine};
//!
//! // EST-LRPT: earliest start first, ties go to the longest remaining job.
//! let engine = RuleEngine::new()
//!     .with_rule(rules::EarliestStart)
//!     .with_tie_breaker(rules::Lrpt);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod engine;
pub mod rules;

pub use context::DispatchContext;
pub use engine::RuleEngine;

use crate::models::Operation;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = i64;

/// A dispatching rule that evaluates operation priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for operations that should be dispatched first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "LRPT").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a dispatchable operation.
    fn evaluate(&self, op: Operation, context: &DispatchContext<'_>) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
