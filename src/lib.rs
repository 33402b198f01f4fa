//! Job-shop scheduling search.
//!
//! Builds an operation order per machine that minimizes makespan, using
//! priority-dispatch greedy constructors and two local searches over the
//! critical-block neighborhood.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Operation`, `Instance`, `ResourceOrder`,
//!   `Schedule`, `SolveResult`
//! - **`dispatching`**: Dispatching rules (SPT, LRPT, EST) and the rule engine
//! - **`scheduler`**: The `Solver` trait, greedy constructors, solver registry
//! - **`search`**: Critical blocks, descent and tabu search
//! - **`validation`**: Instance integrity and schedule feasibility checks
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use jobshop_search::models::Instance;
//! use jobshop_search::scheduler::solver_by_name;
//!
//! let instance: Instance = "3 3\n0 3 1 2 2 2\n0 2 2 1 1 4\n1 4 2 3 0 1\n".parse().unwrap();
//! let solver = solver_by_name("tabu").unwrap();
//! let result = solver.solve(&instance, Instant::now() + Duration::from_millis(200));
//! assert!(result.schedule.is_feasible());
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the Job Shop Problem"

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod search;
pub mod validation;

pub use error::InstanceError;
