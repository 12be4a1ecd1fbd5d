//! Genetic Algorithm engine.
//!
//! A generic GA built on trait-based abstractions. A problem plugs in by
//! implementing [`GaProblem`], which says how to create, evaluate, cross
//! over, and mutate individuals. The runner owns everything else: the
//! random source, selection, the generation loop, and best-so-far tracking.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution carrying its fitness
//! - [`GaProblem`]: Problem definition (initialization, evaluation, operators)
//! - [`GenerationObserver`]: Receives per-generation progress events
//!
//! # Key Types
//!
//! - [`GaConfig`]: Population size, generation count, rates, policies
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best solution plus run statistics
//!
//! # Submodules
//!
//! - [`operators`]: Permutation construction, crossover, repair and mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod observer;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::{CrossoverMode, GaConfig};
pub use observer::{GenerationEvent, GenerationObserver, NoopObserver, TracingObserver};
pub use runner::{initialize_population, GaResult, GaRunner};
pub use selection::Selection;
pub use types::{Fitness, FitnessOf, GaProblem, Individual};
