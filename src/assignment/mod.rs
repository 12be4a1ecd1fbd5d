//! Task-to-agent assignment.
//!
//! Given an N×N [`CostMatrix`], find a one-to-one assignment of N tasks to
//! N agents with low total cost. The search is stochastic: it returns the
//! best assignment it saw, which is not guaranteed to be optimal.
//!
//! ```
//! use u_assign::assignment::{solve, CostMatrix};
//! use u_assign::ga::GaConfig;
//!
//! let matrix = CostMatrix::demo_small();
//! let result = solve(&matrix, &GaConfig::default().with_seed(42)).unwrap();
//!
//! assert!(result.best.is_valid());
//! assert!(result.best_fitness >= 13);
//! ```

mod matrix;
mod problem;

pub use matrix::CostMatrix;
pub use problem::{fitness, Assignment, AssignmentProblem, Repair};

use crate::error::Result;
use crate::ga::{GaConfig, GaResult, GaRunner, GenerationObserver};

/// Searches for a low-cost assignment with the default [`Repair`] policy.
///
/// # Errors
/// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
/// if `config` is invalid.
pub fn solve(matrix: &CostMatrix, config: &GaConfig) -> Result<GaResult<Assignment>> {
    GaRunner::run(&AssignmentProblem::new(matrix), config)
}

/// Like [`solve`], reporting each generation to `observer`.
pub fn solve_observed<O: GenerationObserver<u64>>(
    matrix: &CostMatrix,
    config: &GaConfig,
    observer: &mut O,
) -> Result<GaResult<Assignment>> {
    GaRunner::run_observed(&AssignmentProblem::new(matrix), config, observer)
}
