//! Dispatching state passed to rules.

use crate::models::{Instance, Operation};

/// Runtime dispatching state.
///
/// Tracks, per job and per machine, the earliest time the next operation
/// can start. Both trackers start at 0 and are advanced to the completion
/// time of every dispatched operation.
#[derive(Debug, Clone)]
pub struct DispatchContext<'a> {
    instance: &'a Instance,
    /// Earliest start of the next operation of each job.
    est_job: Vec<i64>,
    /// Earliest start of the next operation on each machine.
    est_machine: Vec<i64>,
}

impl<'a> DispatchContext<'a> {
    /// Creates a context with all trackers at time 0.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            est_job: vec![0; instance.num_jobs],
            est_machine: vec![0; instance.num_machines],
        }
    }

    /// The instance being dispatched.
    #[inline]
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Earliest feasible start: `max(est_job[job], est_machine[machine])`.
    #[inline]
    pub fn earliest_start(&self, op: Operation) -> i64 {
        self.est_job[op.job].max(self.est_machine[self.instance.machine(op)])
    }

    /// Remaining work of `op`'s job, `op` included.
    #[inline]
    pub fn remaining_work(&self, op: Operation) -> i64 {
        self.instance.remaining_work(op)
    }

    /// Records `op` as dispatched at its earliest start; returns that start.
    pub fn record(&mut self, op: Operation) -> i64 {
        let start = self.earliest_start(op);
        let end = start + self.instance.duration(op);
        self.est_job[op.job] = end;
        self.est_machine[self.instance.machine(op)] = end;
        start
    }
}
