//! Genetic-algorithm search for the assignment problem.
//!
//! Assigns N tasks to N agents so that the summed cost from an N×N matrix
//! is low, using an evolutionary metaheuristic rather than an exact method.
//!
//! - [`ga`]: Generic GA engine. Problems implement [`ga::GaProblem`]; the
//!   runner handles selection, the generation loop, best-so-far tracking,
//!   progress events and cancellation.
//! - [`assignment`]: The assignment problem itself: [`assignment::CostMatrix`],
//!   the permutation-encoded [`assignment::Assignment`], and
//!   [`assignment::solve`].
//!
//! A run is single-threaded and synchronous. All randomness flows from one
//! generator per run, seeded from [`ga::GaConfig::seed`] or supplied by the
//! caller, so seeded runs are reproducible.
//!
//! Logging goes through `tracing`; install a subscriber to see it.

pub mod assignment;
mod error;
pub mod ga;

pub use error::{Error, Result};
