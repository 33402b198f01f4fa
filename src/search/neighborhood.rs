//! Critical blocks and the Nowicki–Smutnicki neighborhood.
//!
//! A block is a maximal run of the critical path on a single machine.
//! Only reordering operations on the critical path can shorten the
//! makespan, and swapping operations strictly inside a block cannot, so
//! each block contributes at most two moves: swapping its first two or its
//! last two operations.
//!
//! # Reference
//! Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the Job
//! Shop Problem", Management Science 42(6)

use std::fmt;

use crate::models::{Operation, ResourceOrder, Schedule};

/// A maximal same-machine run of the critical path, as positions in the
/// machine's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    /// Machine the block runs on.
    pub machine: usize,
    /// Position of the block's first operation.
    pub first: usize,
    /// Position of the block's last operation.
    pub last: usize,
}

impl Block {
    /// Creates a block spanning `first..=last` on `machine`.
    pub fn new(machine: usize, first: usize, last: usize) -> Self {
        Self {
            machine,
            first,
            last,
        }
    }

    /// `last - first`; at least 1 for extracted blocks.
    #[inline]
    pub fn width(&self) -> usize {
        self.last - self.first
    }

    /// Candidate swaps touching only the block boundaries.
    ///
    /// Width 1 yields the single swap of both operations; wider blocks
    /// yield the first pair then the last pair.
    pub fn neighbors(&self) -> Vec<Swap> {
        match self.width() {
            0 => Vec::new(),
            1 => vec![Swap::new(self.machine, self.first, self.last)],
            _ => vec![
                Swap::new(self.machine, self.first, self.first + 1),
                Swap::new(self.machine, self.last - 1, self.last),
            ],
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}[{}..={}]", self.machine, self.first, self.last)
    }
}

/// Transposition of two positions in one machine's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Swap {
    /// Machine whose order is changed.
    pub machine: usize,
    /// One position.
    pub t1: usize,
    /// The other position.
    pub t2: usize,
}

impl Swap {
    /// Creates a swap of positions `t1` and `t2` on `machine`.
    pub fn new(machine: usize, t1: usize, t2: usize) -> Self {
        Self { machine, t1, t2 }
    }

    /// Applies the swap in place. Applying it twice restores the order.
    #[inline]
    pub fn apply_on(&self, order: &mut ResourceOrder<'_>) {
        order.swap(self.machine, self.t1, self.t2);
    }
}

/// Splits the critical path of `schedule` into blocks of `order`.
///
/// `schedule` must be the simulation of `order`.
///
/// # Panics
/// If a critical operation is missing from its machine's sequence, which
/// means the order is corrupted.
pub fn critical_blocks(order: &ResourceOrder<'_>, schedule: &Schedule<'_>) -> Vec<Block> {
    let instance = order.instance();
    let path = schedule.critical_path();

    let mut blocks: Vec<Block> = Vec::new();
    let mut run_open = false;
    for pair in path.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let machine = instance.machine(current);
        if machine != instance.machine(next) {
            run_open = false;
            continue;
        }

        let last = position_in(order, next);
        match blocks.last_mut() {
            Some(block) if run_open => block.last = last,
            _ => {
                blocks.push(Block::new(machine, position_in(order, current), last));
                run_open = true;
            }
        }
    }
    blocks
}

fn position_in(order: &ResourceOrder<'_>, op: Operation) -> usize {
    order.position_of(op).unwrap_or_else(|| {
        panic!(
            "corrupted resource order: {op} missing from machine {}",
            order.instance().machine(op)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Instance;
    use crate::scheduler::GreedySolver;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_width_two_block_neighbors() {
        let block = Block::new(1, 0, 2);
        assert_eq!(block.width(), 2);
        assert_eq!(block.neighbors(), vec![Swap::new(1, 0, 1), Swap::new(1, 1, 2)]);
    }

    #[test]
    fn test_width_one_block_neighbors() {
        let block = Block::new(3, 4, 5);
        assert_eq!(block.neighbors(), vec![Swap::new(3, 4, 5)]);
    }

    #[test]
    fn test_wide_block_skips_interior() {
        let block = Block::new(0, 1, 6);
        let swaps = block.neighbors();
        assert_eq!(swaps, vec![Swap::new(0, 1, 2), Swap::new(0, 5, 6)]);
        assert!(swaps
            .iter()
            .all(|s| [s.t1, s.t2].iter().all(|&p| p <= 2 || p >= 5)));
    }

    #[test]
    fn test_swap_involution() {
        let mut rng = SmallRng::seed_from_u64(17);
        let instance = Instance::random(5, 3, 9, &mut rng);
        let (order, _) = GreedySolver::spt().construct(&instance);

        let mut swapped = order.clone();
        let swap = Swap::new(2, 1, 3);
        swap.apply_on(&mut swapped);
        assert_ne!(swapped, order);
        swap.apply_on(&mut swapped);
        assert_eq!(swapped, order);
    }

    fn ordered<'a>(instance: &'a Instance, ops: &[(usize, usize)]) -> ResourceOrder<'a> {
        let mut order = ResourceOrder::new(instance);
        for &(j, p) in ops {
            order.push(Operation::new(j, p));
        }
        order
    }

    #[test]
    fn test_single_machine_is_one_block() {
        // One machine: the whole path is one run. Blocks are maximal, so the
        // last operation of a run of three stays inside the block.
        let instance = Instance::from_jobs(vec![vec![(0, 2)], vec![(0, 3)], vec![(0, 4)]]).unwrap();
        let (order, schedule) = GreedySolver::spt().construct(&instance);
        assert_eq!(critical_blocks(&order, &schedule), vec![Block::new(0, 0, 2)]);
    }

    #[test]
    fn test_toy_block() {
        let instance =
            Instance::from_jobs(vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 4)]]).unwrap();
        let (order, schedule) = GreedySolver::spt().construct(&instance);
        // critical path (0,0) -> (1,1), both on m0
        assert_eq!(critical_blocks(&order, &schedule), vec![Block::new(0, 0, 1)]);
    }

    #[test]
    fn test_no_block_on_job_chain() {
        let instance = Instance::from_jobs(vec![vec![(0, 5), (1, 5)], vec![(1, 1), (0, 1)]]).unwrap();
        let mut order = ResourceOrder::new(&instance);
        for (j, p) in [(0, 0), (1, 1), (1, 0), (0, 1)] {
            order.push(Operation::new(j, p));
        }
        let schedule = order.to_schedule().unwrap();
        // job 0 alone spans the makespan and alternates machines
        assert_eq!(schedule.critical_path(), vec![Operation::new(0, 0), Operation::new(0, 1)]);
        assert!(critical_blocks(&order, &schedule).is_empty());
    }

    #[test]
    fn test_blocks_lie_on_critical_path() {
        let mut rng = SmallRng::seed_from_u64(23);
        for _ in 0..10 {
            let instance = Instance::random(7, 5, 20, &mut rng);
            let (order, schedule) = GreedySolver::est_lrpt().construct(&instance);
            let path = schedule.critical_path();
            for block in critical_blocks(&order, &schedule) {
                assert!(block.width() >= 1);
                for pos in block.first..=block.last {
                    assert!(path.contains(&order.at(block.machine, pos)));
                }
            }
        }
    }

    #[test]
    fn test_blocks_on_two_machines() {
        let instance = Instance::from_jobs(vec![
            vec![(0, 2), (1, 1)],
            vec![(0, 3), (1, 3)],
            vec![(1, 2), (0, 1)],
        ])
        .unwrap();
        let order = ordered(
            &instance,
            &[(0, 0), (1, 0), (2, 1), (0, 1), (1, 1), (2, 0)],
        );
        let schedule = order.to_schedule().unwrap();
        assert_eq!(schedule.makespan(), 11);
        assert_eq!(
            schedule.critical_path(),
            vec![
                Operation::new(0, 0),
                Operation::new(1, 0),
                Operation::new(1, 1),
                Operation::new(2, 0),
                Operation::new(2, 1),
            ]
        );
        // (2,1) closes the path alone on m0 and forms no block.
        assert_eq!(
            critical_blocks(&order, &schedule),
            vec![Block::new(0, 0, 1), Block::new(1, 1, 2)]
        );
    }

    #[test]
    fn test_machine_revisit_starts_new_block() {
        // The path runs on m0, then m1, then m0 again. The second m0 run is
        // its own block rather than an extension of the first.
        let instance = Instance::from_jobs(vec![
            vec![(0, 2), (1, 1)],
            vec![(0, 3), (1, 3)],
            vec![(1, 2), (0, 1)],
            vec![(0, 1), (1, 1)],
        ])
        .unwrap();
        let order = ordered(
            &instance,
            &[
                (0, 0),
                (1, 0),
                (2, 1),
                (3, 0),
                (0, 1),
                (1, 1),
                (2, 0),
                (3, 1),
            ],
        );
        let schedule = order.to_schedule().unwrap();
        assert_eq!(schedule.makespan(), 13);
        assert_eq!(schedule.critical_path().len(), 7);
        assert_eq!(
            critical_blocks(&order, &schedule),
            vec![Block::new(0, 0, 1), Block::new(1, 1, 2), Block::new(0, 2, 3)]
        );
    }

    #[test]
    #[should_panic(expected = "corrupted resource order")]
    fn test_missing_operation_panics() {
        let instance = Instance::from_jobs(vec![vec![(0, 2)], vec![(0, 3)]]).unwrap();
        let (_, schedule) = GreedySolver::spt().construct(&instance);
        let mut corrupted = ResourceOrder::new(&instance);
        corrupted.push(Operation::new(0, 0));
        corrupted.push(Operation::new(0, 0));
        critical_blocks(&corrupted, &schedule);
    }
}
