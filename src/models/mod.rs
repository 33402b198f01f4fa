//! Job-shop domain models.
//!
//! Provides the problem description and the two solution encodings the
//! solvers work with.
//!
//! # Representations
//!
//! | Type | Role |
//! |------|------|
//! | Operation | `(job, position)` identity of one step |
//! | Instance | Machines and durations of every operation |
//! | ResourceOrder | Operation order per machine (search encoding) |
//! | Schedule | Start time per operation (derived, timed) |
//! | SolveResult | Schedule plus termination reason |

mod instance;
mod operation;
mod order;
mod result;
mod schedule;

pub use instance::Instance;
pub use operation::Operation;
pub use order::ResourceOrder;
pub use result::{ExitCause, SolveResult};
pub use schedule::Schedule;
