//! Error types.
//!
//! Every error is raised while setting up a run. Once a [`CostMatrix`] and a
//! [`GaConfig`] have been validated, the evolutionary loop cannot fail.
//!
//! [`CostMatrix`]: crate::assignment::CostMatrix
//! [`GaConfig`]: crate::ga::GaConfig

use thiserror::Error;

/// Setup failures for an assignment search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The problem data is unusable (empty, non-square, negative costs, ...).
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A GA parameter is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl Error {
    pub(crate) fn input(reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_problem() {
        let err = Error::input("cost matrix is empty");
        assert_eq!(err.to_string(), "invalid input: cost matrix is empty");

        let err = Error::config("mutation_rate must be within [0, 1], got 1.5");
        assert!(err.to_string().starts_with("invalid configuration:"));
        assert!(err.to_string().contains("mutation_rate"));
    }
}
