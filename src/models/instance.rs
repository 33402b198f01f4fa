//! Job-shop problem instance.
//!
//! An instance has `num_jobs` jobs, each visiting every one of the
//! `num_machines` machines exactly once, in a job-specific order. The
//! `position`-th operation of job `j` runs on `machines[j][position]` for
//! `durations[j][position]` time units.
//!
//! # Text Format
//!
//! The OR-Library layout is accepted by [`Instance::parse`]:
//!
//! ```text
//! # ft-like toy instance
//! 2 2
//! 0 3 1 2
//! 1 2 0 4
//! ```
//!
//! The header holds `num_jobs num_machines`; each job line holds
//! `machine duration` pairs in job order. `#` lines are comments.
//!
//! # Reference
//! Beasley (1990), "OR-Library: distributing test problems by electronic mail"

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Operation;
use crate::error::InstanceError;
use crate::validation::validate_instance;

/// A job-shop scheduling instance.
///
/// Every constructor validates, deserialization included, so a held
/// `Instance` is always structurally sound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInstance")]
pub struct Instance {
    pub(crate) num_jobs: usize,
    pub(crate) num_machines: usize,
    /// Machine of each operation, indexed `[job][position]`.
    pub(crate) machines: Vec<Vec<usize>>,
    /// Duration of each operation, indexed `[job][position]`.
    pub(crate) durations: Vec<Vec<i64>>,
}

/// Unchecked wire form of an [`Instance`].
#[derive(Deserialize)]
struct RawInstance {
    num_jobs: usize,
    num_machines: usize,
    machines: Vec<Vec<usize>>,
    durations: Vec<Vec<i64>>,
}

impl TryFrom<RawInstance> for Instance {
    type Error = InstanceError;

    fn try_from(raw: RawInstance) -> Result<Self, Self::Error> {
        Self {
            num_jobs: raw.num_jobs,
            num_machines: raw.num_machines,
            machines: raw.machines,
            durations: raw.durations,
        }
        .validated()
    }
}

impl Instance {
    /// Builds an instance from per-job `(machine, duration)` sequences.
    ///
    /// The machine count is the length of the first job. The result is
    /// validated; every structural problem is reported at once.
    pub fn from_jobs(jobs: Vec<Vec<(usize, i64)>>) -> Result<Self, InstanceError> {
        let num_jobs = jobs.len();
        let num_machines = jobs.first().map_or(0, Vec::len);
        let machines = jobs
            .iter()
            .map(|job| job.iter().map(|&(m, _)| m).collect())
            .collect();
        let durations = jobs
            .iter()
            .map(|job| job.iter().map(|&(_, d)| d).collect())
            .collect();

        Self {
            num_jobs,
            num_machines,
            machines,
            durations,
        }
        .validated()
    }

    /// Parses an instance in OR-Library text format.
    pub fn parse(text: &str) -> Result<Self, InstanceError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

        let (header_line, header) = lines.next().ok_or(InstanceError::Parse {
            line: 0,
            message: "missing header line".into(),
        })?;
        let header = parse_numbers(header_line, header)?;
        let (num_jobs, num_machines) = match header.as_slice() {
            [jobs, machines, ..] if *jobs >= 0 && *machines >= 0 => {
                (*jobs as usize, *machines as usize)
            }
            _ => {
                return Err(InstanceError::Parse {
                    line: header_line,
                    message: "header must hold `num_jobs num_machines`".into(),
                })
            }
        };

        // The header is untrusted; grow with the lines actually present.
        let mut jobs = Vec::new();
        for (line, content) in lines.take(num_jobs) {
            let values = parse_numbers(line, content)?;
            if values.len() != 2 * num_machines {
                return Err(InstanceError::Parse {
                    line,
                    message: format!(
                        "expected {} values ({} machine/duration pairs), found {}",
                        2 * num_machines,
                        num_machines,
                        values.len()
                    ),
                });
            }
            let mut job = Vec::with_capacity(num_machines);
            for pair in values.chunks_exact(2) {
                if pair[0] < 0 {
                    return Err(InstanceError::Parse {
                        line,
                        message: format!("negative machine id {}", pair[0]),
                    });
                }
                job.push((pair[0] as usize, pair[1]));
            }
            jobs.push(job);
        }
        if jobs.len() < num_jobs {
            return Err(InstanceError::Truncated {
                expected: num_jobs,
                found: jobs.len(),
            });
        }

        Self {
            num_jobs,
            num_machines,
            machines: jobs
                .iter()
                .map(|job| job.iter().map(|&(m, _)| m).collect())
                .collect(),
            durations: jobs
                .iter()
                .map(|job| job.iter().map(|&(_, d)| d).collect())
                .collect(),
        }
        .validated()
    }

    fn validated(self) -> Result<Self, InstanceError> {
        validate_instance(&self).map_err(InstanceError::Invalid)?;
        Ok(self)
    }

    /// Generates a random instance.
    ///
    /// Each job visits every machine once in a shuffled order; durations
    /// are drawn uniformly from `1..=max_duration`.
    pub fn random<R: Rng>(
        num_jobs: usize,
        num_machines: usize,
        max_duration: i64,
        rng: &mut R,
    ) -> Self {
        let max_duration = max_duration.max(1);
        let mut machines = Vec::with_capacity(num_jobs);
        let mut durations = Vec::with_capacity(num_jobs);
        for _ in 0..num_jobs {
            let mut route: Vec<usize> = (0..num_machines).collect();
            route.shuffle(rng);
            machines.push(route);
            durations.push(
                (0..num_machines)
                    .map(|_| rng.random_range(1..=max_duration))
                    .collect(),
            );
        }
        Self {
            num_jobs,
            num_machines,
            machines,
            durations,
        }
    }

    /// Number of jobs.
    #[inline]
    pub fn num_jobs(&self) -> usize {
        self.num_jobs
    }

    /// Number of machines (= operations per job).
    #[inline]
    pub fn num_machines(&self) -> usize {
        self.num_machines
    }

    /// Total number of operations.
    #[inline]
    pub fn num_operations(&self) -> usize {
        self.num_jobs * self.num_machines
    }

    /// Machine on which `op` runs.
    #[inline]
    pub fn machine(&self, op: Operation) -> usize {
        self.machines[op.job][op.position]
    }

    /// Duration of `op`.
    #[inline]
    pub fn duration(&self, op: Operation) -> i64 {
        self.durations[op.job][op.position]
    }

    /// Machine of the `position`-th operation of `job`.
    #[inline]
    pub fn machine_at(&self, job: usize, position: usize) -> usize {
        self.machines[job][position]
    }

    /// Duration of the `position`-th operation of `job`.
    #[inline]
    pub fn duration_at(&self, job: usize, position: usize) -> i64 {
        self.durations[job][position]
    }

    /// Dense index of `op` in `0..num_operations()`.
    #[inline]
    pub fn op_index(&self, op: Operation) -> usize {
        op.job * self.num_machines + op.position
    }

    /// All operations, job-major.
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        (0..self.num_jobs)
            .flat_map(move |j| (0..self.num_machines).map(move |p| Operation::new(j, p)))
    }

    /// Sum of the durations of `op` and every later operation of its job.
    pub fn remaining_work(&self, op: Operation) -> i64 {
        self.durations[op.job][op.position..].iter().sum()
    }

    /// Total processing time of `job`.
    pub fn job_duration(&self, job: usize) -> i64 {
        self.durations[job].iter().sum()
    }
}

impl FromStr for Instance {
    type Err = InstanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_numbers(line: usize, content: &str) -> Result<Vec<i64>, InstanceError> {
    content
        .split_whitespace()
        .map(|tok| {
            tok.parse::<i64>().map_err(|_| InstanceError::Parse {
                line,
                message: format!("expected integer, found `{tok}`"),
            })
        })
        .collect()
}
