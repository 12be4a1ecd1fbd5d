//! Core trait definitions for the GA engine.
//!
//! [`Individual`] and [`GaProblem`] form the contract between the generic
//! evolutionary loop in [`GaRunner`](super::GaRunner) and a concrete problem
//! such as [`AssignmentProblem`](crate::assignment::AssignmentProblem).

use rand::Rng;

/// Marker trait for fitness values.
///
/// Lower fitness is considered better (minimization).
///
/// Built-in implementations exist for `u64` (integer costs) and `f64`.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Returns a value representing the worst possible fitness.
    ///
    /// Used for individuals that have not been evaluated yet.
    fn worst() -> Self;
}

impl Fitness for u64 {
    fn worst() -> Self {
        u64::MAX
    }
}

impl Fitness for f64 {
    fn worst() -> Self {
        f64::INFINITY
    }
}

/// A candidate solution in the GA population.
///
/// Individuals carry their own fitness. The runner calls
/// [`GaProblem::evaluate`] and stores the result via
/// [`set_fitness`](Individual::set_fitness).
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the current fitness of this individual.
    fn fitness(&self) -> Self::Fitness;

    /// Sets the fitness of this individual.
    fn set_fitness(&mut self, fitness: Self::Fitness);
}

/// Shorthand for the fitness type of a problem's individuals.
pub type FitnessOf<P> = <<P as GaProblem>::Individual as Individual>::Fitness;

/// Defines a GA optimization problem.
///
/// The runner owns the loop and the random source; the problem owns the
/// representation:
///
/// 1. **Initialization**: how to create a random individual
/// 2. **Evaluation**: how to score it
/// 3. **Crossover**: how to recombine two parents into one offspring
/// 4. **Mutation**: how to perturb an offspring in place
///
/// Every method receives the run's single random generator, so a seeded run
/// is fully reproducible.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random, unevaluated individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual and returns its fitness. Must be pure.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Produces one offspring from two parents.
    ///
    /// The default implementation clones `parent1` (no recombination).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Self::Individual {
        parent1.clone()
    }

    /// Mutates an individual in place.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}
}
