//! Resource-order encoding of a solution.
//!
//! A `ResourceOrder` lists, for each machine, the operations it processes
//! in execution order. It is the representation the local-search solvers
//! mutate; a timed [`Schedule`] is derived from it by simulation.
//!
//! # Reference
//! Cheng et al. (1996), "A Tutorial Survey of JSSP using GA" (encodings)

use super::{Instance, Operation, Schedule};

/// Per-machine operation sequences.
///
/// `Clone` copies every sequence, so a clone never shares storage with
/// the original. Equality compares the sequences elementwise.
#[derive(Debug, Clone)]
pub struct ResourceOrder<'a> {
    instance: &'a Instance,
    /// Operations per machine; the length of a sequence is that machine's
    /// next free slot while the order is being filled.
    tasks_by_machine: Vec<Vec<Operation>>,
}

impl<'a> ResourceOrder<'a> {
    /// Creates an empty order.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            tasks_by_machine: (0..instance.num_machines)
                .map(|_| Vec::with_capacity(instance.num_jobs))
                .collect(),
        }
    }

    /// Reads the machine order off a timed schedule (operations sorted by
    /// start time on each machine).
    pub fn from_schedule(schedule: &Schedule<'a>) -> Self {
        let instance = schedule.instance();
        let tasks_by_machine = (0..instance.num_machines)
            .map(|m| {
                let mut seq = schedule.sequence(m).to_vec();
                seq.sort_by_key(|&op| schedule.start(op));
                seq
            })
            .collect();
        Self {
            instance,
            tasks_by_machine,
        }
    }

    /// The instance this order belongs to.
    #[inline]
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Appends `op` at the next free slot of its machine.
    pub fn push(&mut self, op: Operation) {
        let machine = self.instance.machine(op);
        self.tasks_by_machine[machine].push(op);
    }

    /// Next free slot on `machine`.
    #[inline]
    pub fn next_free_slot(&self, machine: usize) -> usize {
        self.tasks_by_machine[machine].len()
    }

    /// Whether every machine holds `num_jobs` operations.
    pub fn is_complete(&self) -> bool {
        self.tasks_by_machine
            .iter()
            .all(|seq| seq.len() == self.instance.num_jobs)
    }

    /// Operations of `machine` in order.
    #[inline]
    pub fn sequence(&self, machine: usize) -> &[Operation] {
        &self.tasks_by_machine[machine]
    }

    /// Operation at `position` on `machine`.
    #[inline]
    pub fn at(&self, machine: usize, position: usize) -> Operation {
        self.tasks_by_machine[machine][position]
    }

    /// Position of `op` on its machine, by linear scan.
    pub fn position_of(&self, op: Operation) -> Option<usize> {
        self.tasks_by_machine[self.instance.machine(op)]
            .iter()
            .position(|&o| o == op)
    }

    /// Exchanges positions `i` and `j` on `machine`.
    #[inline]
    pub fn swap(&mut self, machine: usize, i: usize, j: usize) {
        self.tasks_by_machine[machine].swap(i, j);
    }

    /// Simulates the order into a left-shifted timed schedule.
    ///
    /// Every operation starts as soon as both its job predecessor and its
    /// machine predecessor have completed. Returns `None` if the order is
    /// incomplete or deadlocked (the machine orders and job orders form a
    /// cycle).
    pub fn to_schedule(&self) -> Option<Schedule<'a>> {
        if !self.is_complete() {
            return None;
        }
        let instance = self.instance;
        let num_jobs = instance.num_jobs;

        let mut starts = vec![vec![0_i64; instance.num_machines]; num_jobs];
        let mut job_next = vec![0_usize; num_jobs];
        let mut job_ready = vec![0_i64; num_jobs];
        let mut machine_next = vec![0_usize; instance.num_machines];
        let mut machine_ready = vec![0_i64; instance.num_machines];
        let mut remaining = instance.num_operations();

        while remaining > 0 {
            let mut progressed = false;
            for (m, seq) in self.tasks_by_machine.iter().enumerate() {
                while let Some(&op) = seq.get(machine_next[m]) {
                    if job_next[op.job] != op.position {
                        break;
                    }
                    let start = job_ready[op.job].max(machine_ready[m]);
                    let end = start + instance.duration(op);
                    starts[op.job][op.position] = start;
                    job_ready[op.job] = end;
                    machine_ready[m] = end;
                    job_next[op.job] += 1;
                    machine_next[m] += 1;
                    remaining -= 1;
                    progressed = true;
                }
            }
            if !progressed {
                return None;
            }
        }

        Some(Schedule::new(
            instance,
            starts,
            self.tasks_by_machine.clone(),
        ))
    }
}

impl PartialEq for ResourceOrder<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.tasks_by_machine == other.tasks_by_machine
    }
}

impl Eq for ResourceOrder<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> Instance {
        Instance::from_jobs(vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 4)]]).unwrap()
    }

    fn filled<'a>(instance: &'a Instance, ops: &[(usize, usize)]) -> ResourceOrder<'a> {
        let mut order = ResourceOrder::new(instance);
        for &(j, p) in ops {
            order.push(Operation::new(j, p));
        }
        order
    }

    #[test]
    fn test_push_fills_slots() {
        let instance = toy();
        let mut order = ResourceOrder::new(&instance);
        assert_eq!(order.next_free_slot(0), 0);
        order.push(Operation::new(0, 0));
        assert_eq!(order.next_free_slot(0), 1);
        assert_eq!(order.next_free_slot(1), 0);
        assert!(!order.is_complete());
        assert!(order.to_schedule().is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let instance = toy();
        let order = filled(&instance, &[(0, 0), (1, 1), (1, 0), (0, 1)]);
        let mut copy = order.clone();
        assert_eq!(copy, order);

        copy.swap(0, 0, 1);
        assert_ne!(copy, order);
        assert_eq!(order.at(0, 0), Operation::new(0, 0));
    }

    #[test]
    fn test_position_of() {
        let instance = toy();
        let order = filled(&instance, &[(0, 0), (1, 1), (1, 0), (0, 1)]);
        assert_eq!(order.position_of(Operation::new(1, 1)), Some(1));
        assert_eq!(order.position_of(Operation::new(1, 0)), Some(0));
    }

    #[test]
    fn test_deadlock_detected() {
        let instance = toy();
        // m0 runs (1,1) before (0,0); m1 runs (0,1) before (1,0): cycle.
        let order = filled(&instance, &[(1, 1), (0, 0), (0, 1), (1, 0)]);
        assert!(order.is_complete());
        assert!(order.to_schedule().is_none());
    }

    #[test]
    fn test_round_trip_through_schedule() {
        let instance = toy();
        let order = filled(&instance, &[(0, 0), (1, 1), (1, 0), (0, 1)]);
        let schedule = order.to_schedule().unwrap();
        assert_eq!(ResourceOrder::from_schedule(&schedule), order);
    }
}
