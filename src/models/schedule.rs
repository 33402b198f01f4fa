//! Timed schedule (solution) model.
//!
//! A schedule gives every operation a start time. It also keeps the
//! per-machine sequences it was derived from, so the critical path can
//! follow machine predecessors exactly.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 7

use super::{Instance, Operation};
use crate::validation::validate_schedule;

/// Start times for every operation of an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule<'a> {
    instance: &'a Instance,
    /// Start time per operation, indexed `[job][position]`.
    starts: Vec<Vec<i64>>,
    /// Operations per machine in execution order.
    sequences: Vec<Vec<Operation>>,
}

impl<'a> Schedule<'a> {
    /// Creates a schedule from start times and the machine sequences they
    /// were computed from.
    pub fn new(
        instance: &'a Instance,
        starts: Vec<Vec<i64>>,
        sequences: Vec<Vec<Operation>>,
    ) -> Self {
        Self {
            instance,
            starts,
            sequences,
        }
    }

    /// The scheduled instance.
    #[inline]
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Start time of `op`.
    #[inline]
    pub fn start(&self, op: Operation) -> i64 {
        self.starts[op.job][op.position]
    }

    /// Completion time of `op`.
    #[inline]
    pub fn end(&self, op: Operation) -> i64 {
        self.start(op) + self.instance.duration(op)
    }

    /// Operations of `machine` in execution order.
    #[inline]
    pub fn sequence(&self, machine: usize) -> &[Operation] {
        &self.sequences[machine]
    }

    /// Makespan: latest completion time (0 for an empty instance).
    pub fn makespan(&self) -> i64 {
        self.instance
            .operations()
            .map(|op| self.end(op))
            .max()
            .unwrap_or(0)
    }

    /// Whether job precedence and machine exclusivity both hold.
    pub fn is_feasible(&self) -> bool {
        validate_schedule(self).is_ok()
    }

    /// One chain of zero-slack operations explaining the makespan.
    ///
    /// Walks back from the first operation (job-major) that ends at the
    /// makespan. At each step the job predecessor is preferred when it ends
    /// exactly at the current start; otherwise the machine predecessor is
    /// taken. The chain is returned in execution order.
    pub fn critical_path(&self) -> Vec<Operation> {
        let makespan = self.makespan();
        let Some(last) = self.instance.operations().find(|&op| self.end(op) == makespan) else {
            return Vec::new();
        };

        let mut path = vec![last];
        let mut current = last;
        while self.start(current) > 0 {
            let start = self.start(current);
            let job_pred = current.predecessor().filter(|&p| self.end(p) == start);
            let prev = job_pred.or_else(|| {
                self.machine_predecessor(current)
                    .filter(|&p| self.end(p) == start)
            });
            match prev {
                Some(p) => {
                    path.push(p);
                    current = p;
                }
                // Left-shifted schedules never get here.
                None => break,
            }
        }
        path.reverse();
        path
    }

    fn machine_predecessor(&self, op: Operation) -> Option<Operation> {
        let seq = &self.sequences[self.instance.machine(op)];
        let idx = seq.iter().position(|&o| o == op)?;
        idx.checked_sub(1).map(|i| seq[i])
    }
}
