//! Per-generation progress reporting.
//!
//! The runner reports every completed generation to a [`GenerationObserver`].
//! Closures taking `&GenerationEvent<F>` are observers, so callers can render
//! progress however they like; [`TracingObserver`] forwards events to
//! `tracing`; `()` discards everything.

use super::types::Fitness;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot emitted after each generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationEvent<F> {
    /// 1-based index of the generation that just finished.
    pub generation: usize,

    /// Best fitness found so far in the run.
    pub best_fitness: F,

    /// Whether this generation produced a new best.
    pub improved: bool,
}

/// Receives progress events from [`GaRunner`](super::GaRunner).
pub trait GenerationObserver<F: Fitness> {
    fn on_generation(&mut self, event: &GenerationEvent<F>);
}

impl<F, C> GenerationObserver<F> for C
where
    F: Fitness,
    C: FnMut(&GenerationEvent<F>),
{
    fn on_generation(&mut self, event: &GenerationEvent<F>) {
        self(event)
    }
}

impl<F: Fitness> GenerationObserver<F> for () {
    fn on_generation(&mut self, _event: &GenerationEvent<F>) {}
}

/// Discards every event. Same as `()`, for call sites that want a name.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<F: Fitness> GenerationObserver<F> for NoopObserver {
    fn on_generation(&mut self, _event: &GenerationEvent<F>) {}
}

/// Logs events through `tracing`.
///
/// Improvements are logged at `INFO`, every other generation at `TRACE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<F: Fitness> GenerationObserver<F> for TracingObserver {
    fn on_generation(&mut self, event: &GenerationEvent<F>) {
        if event.improved {
            tracing::info!(
                generation = event.generation,
                best_fitness = ?event.best_fitness,
                "new best solution"
            );
        } else {
            tracing::trace!(
                generation = event.generation,
                best_fitness = ?event.best_fitness,
                "generation complete"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit<O: GenerationObserver<u64>>(observer: &mut O) {
        for generation in 1..=3 {
            observer.on_generation(&GenerationEvent {
                generation,
                best_fitness: 10 - generation as u64,
                improved: generation != 2,
            });
        }
    }

    #[test]
    fn test_closure_observer_receives_events() {
        let mut seen = Vec::new();
        emit(&mut |event: &GenerationEvent<u64>| seen.push(*event));

        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].generation, 1);
        assert_eq!(seen[2].best_fitness, 7);
        assert!(!seen[1].improved);
    }

    #[test]
    fn test_builtin_observers_accept_events() {
        emit(&mut ());
        emit(&mut NoopObserver);
        emit(&mut TracingObserver);
    }
}
