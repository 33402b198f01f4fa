//! Operation (job step) identity.
//!
//! An operation is the `position`-th step of `job`. It carries no data of
//! its own: machine and duration are looked up in the [`Instance`].
//!
//! [`Instance`]: super::Instance

use serde::{Deserialize, Serialize};
use std::fmt;

/// One unit of work: the `position`-th operation of `job`.
///
/// Identity is the `(job, position)` pair, so operations can be used as
/// map keys and stored directly in machine sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Operation {
    /// Job index.
    pub job: usize,
    /// Position within the job (0-indexed).
    pub position: usize,
}

impl Operation {
    /// Creates an operation.
    #[inline]
    pub fn new(job: usize, position: usize) -> Self {
        Self { job, position }
    }

    /// The next operation of the same job, if `position + 1 < ops_per_job`.
    #[inline]
    pub fn successor(&self, ops_per_job: usize) -> Option<Self> {
        (self.position + 1 < ops_per_job).then(|| Self::new(self.job, self.position + 1))
    }

    /// The previous operation of the same job.
    #[inline]
    pub fn predecessor(&self) -> Option<Self> {
        self.position
            .checked_sub(1)
            .map(|p| Self::new(self.job, p))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.job, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successor_and_predecessor() {
        let op = Operation::new(2, 0);
        assert_eq!(op.successor(3), Some(Operation::new(2, 1)));
        assert_eq!(op.predecessor(), None);

        let last = Operation::new(2, 2);
        assert_eq!(last.successor(3), None);
        assert_eq!(last.predecessor(), Some(Operation::new(2, 1)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Operation::new(1, 4).to_string(), "(1,4)");
    }
}
