//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives a run through three phases:
//!
//! 1. **Initializing**: build and evaluate the first population, record its
//!    fittest individual as the best-so-far.
//! 2. **Evolving**: for exactly `max_generations` rounds, breed a full
//!    replacement population (select → crossover → mutate), evaluate it, and
//!    update the best-so-far when a strictly better individual appears.
//! 3. **Done**: return the best-so-far.
//!
//! The working population is replaced wholesale each round; nothing is
//! carried over. The best individual is tracked separately and is not
//! guaranteed to survive in the population.

use super::config::{CrossoverMode, GaConfig};
use super::observer::{GenerationEvent, GenerationObserver, NoopObserver};
use super::types::{FitnessOf, GaProblem, Individual};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a GA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "I: Serialize, I::Fitness: Serialize",
        deserialize = "I: Deserialize<'de>, I::Fitness: Deserialize<'de>"
    ))
)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Number of generations completed after the initial population.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best-so-far fitness: entry 0 is the initial population, then one
    /// entry per completed generation. Non-increasing.
    pub fitness_history: Vec<I::Fitness>,
}

/// Executes the GA evolutionary loop.
///
/// ```
/// use u_assign::assignment::{AssignmentProblem, CostMatrix};
/// use u_assign::ga::{GaConfig, GaRunner};
///
/// let matrix = CostMatrix::demo_small();
/// let problem = AssignmentProblem::new(&matrix);
/// let config = GaConfig::default().with_max_generations(50).with_seed(42);
///
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert!(result.best_fitness >= 13);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA without progress reporting.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if `config` fails [`GaConfig::validate`]. Nothing is evaluated in that case.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        Self::run_with_cancel(problem, config, &mut NoopObserver, None)
    }

    /// Runs the GA, reporting each generation to `observer`.
    pub fn run_observed<P, O>(
        problem: &P,
        config: &GaConfig,
        observer: &mut O,
    ) -> Result<GaResult<P::Individual>>
    where
        P: GaProblem,
        O: GenerationObserver<FitnessOf<P>>,
    {
        Self::run_with_cancel(problem, config, observer, None)
    }

    /// Runs the GA with an optional cancellation flag.
    ///
    /// The flag is checked before each generation. Once it is set, the run
    /// stops and returns the best solution found so far with
    /// `cancelled = true`.
    pub fn run_with_cancel<P, O>(
        problem: &P,
        config: &GaConfig,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>>
    where
        P: GaProblem,
        O: GenerationObserver<FitnessOf<P>>,
    {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::run_with_rng(problem, config, observer, cancel, &mut rng)
    }

    /// Runs the GA drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored; the caller owns the generator.
    pub fn run_with_rng<P, O, R>(
        problem: &P,
        config: &GaConfig,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
        rng: &mut R,
    ) -> Result<GaResult<P::Individual>>
    where
        P: GaProblem,
        O: GenerationObserver<FitnessOf<P>>,
        R: Rng,
    {
        config.validate()?;

        let span = tracing::info_span!(
            "ga_run",
            population_size = config.population_size,
            max_generations = config.max_generations
        );
        let _guard = span.enter();

        let mut population = initialize_population(problem, config.population_size, rng);
        let mut best = find_best(&population).clone();
        tracing::info!(initial_best = ?best.fitness(), "population initialized");

        let mut fitness_history = Vec::with_capacity(config.max_generations.min(4096) + 1);
        fitness_history.push(best.fitness());

        let mut generations = 0usize;
        let mut cancelled = false;

        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            population = next_generation(problem, config, &population, rng);
            generations = gen + 1;

            let gen_best = find_best(&population);
            let improved = gen_best.fitness() < best.fitness();
            if improved {
                best = gen_best.clone();
                tracing::debug!(
                    generation = generations,
                    best_fitness = ?best.fitness(),
                    "improved best solution"
                );
            }

            fitness_history.push(best.fitness());
            observer.on_generation(&GenerationEvent {
                generation: generations,
                best_fitness: best.fitness(),
                improved,
            });
        }

        tracing::info!(
            generations,
            cancelled,
            best_fitness = ?best.fitness(),
            "run finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations,
            cancelled,
            fitness_history,
        })
    }
}

/// Builds `size` independent random individuals and evaluates them.
pub fn initialize_population<P: GaProblem, R: Rng>(
    problem: &P,
    size: usize,
    rng: &mut R,
) -> Vec<P::Individual> {
    (0..size)
        .map(|_| {
            let mut ind = problem.create_individual(rng);
            let f = problem.evaluate(&ind);
            ind.set_fitness(f);
            ind
        })
        .collect()
}

/// Breeds a full replacement population from `population`.
fn next_generation<P: GaProblem, R: Rng>(
    problem: &P,
    config: &GaConfig,
    population: &[P::Individual],
    rng: &mut R,
) -> Vec<P::Individual> {
    (0..config.population_size)
        .map(|_| {
            // Parents are drawn independently and may be the same individual.
            let p1 = &population[config.selection.select(population, rng)];
            let p2 = &population[config.selection.select(population, rng)];

            let recombine = match config.crossover_mode {
                CrossoverMode::Always => true,
                CrossoverMode::Probabilistic => rng.random_bool(config.crossover_rate),
            };
            let mut child = if recombine {
                problem.crossover(p1, p2, rng)
            } else {
                p1.clone()
            };

            if rng.random_bool(config.mutation_rate) {
                problem.mutate(&mut child, rng);
            }

            let f = problem.evaluate(&child);
            child.set_fitness(f);
            child
        })
        .collect()
}

/// Finds the individual with the lowest fitness; the earliest one wins ties.
///
/// # Panics
/// Panics if `population` is empty.
fn find_best<I: Individual>(population: &[I]) -> &I {
    let (first, rest) = population
        .split_first()
        .expect("population must not be empty");
    rest.iter().fold(first, |best, ind| {
        if ind.fitness() < best.fitness() {
            ind
        } else {
            best
        }
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ga::{Fitness, Selection};
    use std::sync::atomic::AtomicUsize;

    // ---- OneMax: minimize the number of zero bits ----

    #[derive(Clone, Debug)]
    struct BitString {
        bits: Vec<bool>,
        fitness: u64,
    }

    impl Individual for BitString {
        type Fitness = u64;
        fn fitness(&self) -> u64 {
            self.fitness
        }
        fn set_fitness(&mut self, f: u64) {
            self.fitness = f;
        }
    }

    struct OneMaxProblem {
        n: usize,
    }

    impl GaProblem for OneMaxProblem {
        type Individual = BitString;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> BitString {
            BitString {
                bits: (0..self.n).map(|_| rng.random_bool(0.5)).collect(),
                fitness: u64::MAX,
            }
        }

        fn evaluate(&self, ind: &BitString) -> u64 {
            ind.bits.iter().filter(|&&b| !b).count() as u64
        }

        fn crossover<R: Rng>(&self, p1: &BitString, p2: &BitString, _rng: &mut R) -> BitString {
            let mid = self.n / 2;
            let mut bits = p1.bits[..mid].to_vec();
            bits.extend_from_slice(&p2.bits[mid..]);
            BitString {
                bits,
                fitness: u64::MAX,
            }
        }

        fn mutate<R: Rng>(&self, ind: &mut BitString, rng: &mut R) {
            let idx = rng.random_range(0..self.n);
            ind.bits[idx] = !ind.bits[idx];
        }
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_max_generations(60)
            .with_mutation_rate(0.3)
            .with_seed(42)
    }

    #[test]
    fn test_runs_exact_generation_count() {
        let problem = OneMaxProblem { n: 16 };
        let result = GaRunner::run(&problem, &config()).unwrap();

        assert_eq!(result.generations, 60);
        assert!(!result.cancelled);
        assert_eq!(result.fitness_history.len(), 61);
    }

    #[test]
    fn test_best_is_monotonic() {
        let problem = OneMaxProblem { n: 16 };
        let result = GaRunner::run(&problem, &config()).unwrap();

        for window in result.fitness_history.windows(2) {
            assert!(window[1] <= window[0], "best got worse: {window:?}");
        }
        assert_eq!(result.best_fitness, *result.fitness_history.last().unwrap());
        assert_eq!(result.best_fitness, problem.evaluate(&result.best));
    }

    #[test]
    fn test_onemax_improves() {
        let problem = OneMaxProblem { n: 20 };
        let config = config()
            .with_selection(Selection::Tournament(3))
            .with_max_generations(150);
        let result = GaRunner::run(&problem, &config).unwrap();

        assert!(
            result.best_fitness <= 4,
            "expected at most 4 zero bits, got {}",
            result.best_fitness
        );
        assert!(result.best_fitness <= result.fitness_history[0]);
    }

    #[test]
    fn test_seed_reproducible() {
        let problem = OneMaxProblem { n: 24 };
        let a = GaRunner::run(&problem, &config()).unwrap();
        let b = GaRunner::run(&problem, &config()).unwrap();

        assert_eq!(a.fitness_history, b.fitness_history);
        assert_eq!(a.best.bits, b.best.bits);
    }

    #[test]
    fn test_caller_supplied_rng() {
        let problem = OneMaxProblem { n: 24 };
        let mut rng_a = StdRng::seed_from_u64(9);
        let mut rng_b = StdRng::seed_from_u64(9);

        let a = GaRunner::run_with_rng(&problem, &config(), &mut NoopObserver, None, &mut rng_a)
            .unwrap();
        let b = GaRunner::run_with_rng(&problem, &config(), &mut NoopObserver, None, &mut rng_b)
            .unwrap();
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_observer_sees_every_generation() {
        let problem = OneMaxProblem { n: 16 };
        let mut events = Vec::new();
        let result = GaRunner::run_observed(&problem, &config(), &mut |e: &GenerationEvent<u64>| {
            events.push(*e)
        })
        .unwrap();

        assert_eq!(events.len(), 60);
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.generation, i + 1);
            assert_eq!(event.best_fitness, result.fitness_history[i + 1]);
            assert_eq!(
                event.improved,
                result.fitness_history[i + 1] < result.fitness_history[i]
            );
        }
    }

    #[test]
    fn test_cancel_before_start() {
        let problem = OneMaxProblem { n: 16 };
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            GaRunner::run_with_cancel(&problem, &config(), &mut NoopObserver, Some(cancel))
                .unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.fitness_history.len(), 1);
    }

    #[test]
    fn test_cancel_midway() {
        let problem = OneMaxProblem { n: 16 };
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();
        let mut stop_after_ten = |e: &GenerationEvent<u64>| {
            if e.generation == 10 {
                flag.store(true, Ordering::Relaxed);
            }
        };

        let result = GaRunner::run_with_cancel(
            &problem,
            &config().with_max_generations(10_000),
            &mut stop_after_ten,
            Some(cancel),
        )
        .unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 10);
        assert_eq!(result.fitness_history.len(), 11);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let problem = OneMaxProblem { n: 8 };
        let err = GaRunner::run(&problem, &config().with_crossover_rate(2.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    // ---- Operator gating ----

    /// Counts operator calls; the genes never change.
    struct CountingProblem {
        crossovers: AtomicUsize,
        mutations: AtomicUsize,
    }

    impl CountingProblem {
        fn new() -> Self {
            Self {
                crossovers: AtomicUsize::new(0),
                mutations: AtomicUsize::new(0),
            }
        }

        fn counts(&self) -> (usize, usize) {
            (
                self.crossovers.load(Ordering::Relaxed),
                self.mutations.load(Ordering::Relaxed),
            )
        }
    }

    impl GaProblem for CountingProblem {
        type Individual = BitString;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> BitString {
            BitString {
                bits: vec![rng.random_bool(0.5); 2],
                fitness: u64::MAX,
            }
        }

        fn evaluate(&self, ind: &BitString) -> u64 {
            ind.bits.iter().filter(|&&b| !b).count() as u64
        }

        fn crossover<R: Rng>(&self, p1: &BitString, _p2: &BitString, _rng: &mut R) -> BitString {
            self.crossovers.fetch_add(1, Ordering::Relaxed);
            p1.clone()
        }

        fn mutate<R: Rng>(&self, _ind: &mut BitString, _rng: &mut R) {
            self.mutations.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn gated(mode: CrossoverMode, crossover_rate: f64, mutation_rate: f64) -> (usize, usize) {
        let problem = CountingProblem::new();
        let config = GaConfig::default()
            .with_population_size(12)
            .with_max_generations(7)
            .with_crossover_mode(mode)
            .with_crossover_rate(crossover_rate)
            .with_mutation_rate(mutation_rate)
            .with_seed(42);
        GaRunner::run(&problem, &config).unwrap();
        problem.counts()
    }

    #[test]
    fn test_always_mode_ignores_crossover_rate() {
        assert_eq!(gated(CrossoverMode::Always, 0.0, 0.0), (12 * 7, 0));
    }

    #[test]
    fn test_probabilistic_mode_rate_zero_only_copies() {
        assert_eq!(gated(CrossoverMode::Probabilistic, 0.0, 0.0), (0, 0));
    }

    #[test]
    fn test_probabilistic_mode_rate_one_always_crosses() {
        assert_eq!(gated(CrossoverMode::Probabilistic, 1.0, 0.0), (12 * 7, 0));
    }

    #[test]
    fn test_mutation_rate_one_mutates_each_offspring_once() {
        assert_eq!(gated(CrossoverMode::Probabilistic, 0.0, 1.0), (0, 12 * 7));
    }

    #[test]
    fn test_partial_rates_gate_some_offspring() {
        let (crossovers, mutations) = gated(CrossoverMode::Probabilistic, 0.5, 0.5);
        assert!(crossovers > 0 && crossovers < 12 * 7, "crossovers = {crossovers}");
        assert!(mutations > 0 && mutations < 12 * 7, "mutations = {mutations}");
    }

    #[test]
    fn test_frozen_history_without_operators() {
        let problem = OneMaxProblem { n: 16 };
        let config = config().with_crossover_rate(0.0).with_mutation_rate(0.0);
        let result = GaRunner::run(&problem, &config).unwrap();

        // Offspring are copies of existing individuals, so nothing can improve
        assert!(result
            .fitness_history
            .iter()
            .all(|&f| f == result.fitness_history[0]));
    }

    #[test]
    fn test_population_of_one() {
        let problem = OneMaxProblem { n: 8 };
        let result = GaRunner::run(&problem, &config().with_population_size(1)).unwrap();
        assert_eq!(result.generations, 60);
    }

    // ---- Default crossover/mutate (no-op) ----

    struct FrozenProblem;

    impl GaProblem for FrozenProblem {
        type Individual = BitString;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> BitString {
            BitString {
                bits: vec![rng.random_bool(0.5); 4],
                fitness: u64::MAX,
            }
        }

        fn evaluate(&self, ind: &BitString) -> u64 {
            ind.bits.iter().filter(|&&b| !b).count() as u64
        }
    }

    #[test]
    fn test_default_operators_only_copy() {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(10)
            .with_seed(42);
        let result = GaRunner::run(&FrozenProblem, &config).unwrap();

        // Only all-true or all-false strings exist, so the best is one of them
        assert!(result.best_fitness == 0 || result.best_fitness == 4);
        assert_eq!(result.best_fitness, result.fitness_history[0]);
    }

    // ---- Real-valued fitness ----

    #[derive(Clone, Debug)]
    struct RealVector {
        genes: Vec<f64>,
        fitness: f64,
    }

    impl Individual for RealVector {
        type Fitness = f64;
        fn fitness(&self) -> f64 {
            self.fitness
        }
        fn set_fitness(&mut self, f: f64) {
            self.fitness = f;
        }
    }

    struct SphereProblem {
        dim: usize,
    }

    impl GaProblem for SphereProblem {
        type Individual = RealVector;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> RealVector {
            RealVector {
                genes: (0..self.dim).map(|_| rng.random_range(-5.0..5.0)).collect(),
                fitness: f64::worst(),
            }
        }

        fn evaluate(&self, ind: &RealVector) -> f64 {
            ind.genes.iter().map(|x| x * x).sum()
        }

        fn crossover<R: Rng>(&self, p1: &RealVector, p2: &RealVector, _rng: &mut R) -> RealVector {
            let mid = self.dim / 2;
            let mut genes = p1.genes[..mid].to_vec();
            genes.extend_from_slice(&p2.genes[mid..]);
            RealVector {
                genes,
                fitness: f64::worst(),
            }
        }

        fn mutate<R: Rng>(&self, ind: &mut RealVector, rng: &mut R) {
            let idx = rng.random_range(0..self.dim);
            ind.genes[idx] += rng.random_range(-0.5..0.5);
        }
    }

    #[test]
    fn test_sphere_with_float_fitness() {
        let problem = SphereProblem { dim: 4 };
        let config = GaConfig::default()
            .with_max_generations(200)
            .with_selection(Selection::Tournament(3))
            .with_mutation_rate(0.5)
            .with_seed(42);
        let result = GaRunner::run(&problem, &config).unwrap();

        assert!(result.best_fitness < result.fitness_history[0]);
        assert!(result.best_fitness < 5.0, "got {}", result.best_fitness);
        for w in result.fitness_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
    }

    // ---- Helpers ----

    #[test]
    fn test_find_best_prefers_first_on_ties() {
        let pop: Vec<BitString> = [5, 2, 7, 2]
            .iter()
            .enumerate()
            .map(|(i, &f)| BitString {
                bits: vec![i % 2 == 0],
                fitness: f,
            })
            .collect();
        let best = find_best(&pop);
        assert_eq!(best.fitness, 2);
        assert!(std::ptr::eq(best, &pop[1]));
    }

    #[test]
    fn test_initialize_population_is_evaluated() {
        let problem = OneMaxProblem { n: 10 };
        let mut rng = StdRng::seed_from_u64(1);
        let pop = initialize_population(&problem, 25, &mut rng);

        assert_eq!(pop.len(), 25);
        for ind in &pop {
            assert_eq!(ind.bits.len(), 10);
            assert_eq!(ind.fitness(), problem.evaluate(ind));
        }
    }
}
