//! GA configuration.
//!
//! [`GaConfig`] holds every parameter that controls the evolutionary loop.
//! Builder setters store values as given; [`GaConfig::validate`] is the
//! single place where ranges are checked.

use super::selection::Selection;
use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How offspring are produced from a selected pair of parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CrossoverMode {
    /// Every offspring is the result of crossover. `crossover_rate` is ignored.
    Always,

    /// Crossover happens with probability `crossover_rate`; otherwise the
    /// offspring is an unchanged copy of the first parent.
    #[default]
    Probabilistic,
}

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_assign::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_assign::ga::{CrossoverMode, GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_max_generations(1000)
///     .with_crossover_mode(CrossoverMode::Always)
///     .with_selection(Selection::Tournament(3))
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Number of generations to run after the initial population.
    pub max_generations: usize,

    /// Probability of mutating an offspring, decided once per offspring.
    pub mutation_rate: f64,

    /// Probability of recombining a parent pair under
    /// [`CrossoverMode::Probabilistic`].
    pub crossover_rate: f64,

    /// Whether crossover is unconditional or gated by `crossover_rate`.
    pub crossover_mode: CrossoverMode,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed for every run.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            crossover_mode: CrossoverMode::default(),
            selection: Selection::default(),
            seed: None,
        }
    }
}

impl GaConfig {
    /// Problem size from which [`for_problem_size`](Self::for_problem_size)
    /// switches to the [`extended`](Self::extended) preset.
    pub const LARGE_INSTANCE: usize = 500;

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    pub fn with_crossover_mode(mut self, mode: CrossoverMode) -> Self {
        self.crossover_mode = mode;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for small and medium instances: 100 individuals, 500 generations.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Preset for large instances (hundreds of tasks and up): 100
    /// individuals, 1000 generations.
    pub fn extended() -> Self {
        Self {
            max_generations: 1000,
            ..Self::default()
        }
    }

    /// Picks [`standard`](Self::standard) or [`extended`](Self::extended)
    /// from the number of tasks.
    pub fn for_problem_size(n: usize) -> Self {
        if n >= Self::LARGE_INSTANCE {
            Self::extended()
        } else {
            Self::standard()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::config("population_size must be at least 1"));
        }
        if self.max_generations == 0 {
            return Err(Error::config("max_generations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::config(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(Error::config(format!(
                "crossover_rate must be within [0, 1], got {}",
                self.crossover_rate
            )));
        }
        if let Selection::Tournament(0) = self.selection {
            return Err(Error::config("tournament size must be at least 1"));
        }
        Ok(())
    }
}
