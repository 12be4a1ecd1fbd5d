//! The assignment problem as a [`GaProblem`].
//!
//! An [`Assignment`] is a permutation encoding: `agents[i]` is the agent
//! given task `i`. Its fitness is the total cost from the [`CostMatrix`].

use super::matrix::CostMatrix;
use crate::ga::operators::{
    is_permutation, midpoint_crossover, random_permutation, repair_permutation, swap_mutation,
};
use crate::ga::{Fitness, GaProblem, Individual};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What happens to an offspring after midpoint crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Repair {
    /// Keep the raw crossover output. Offspring may assign one agent to
    /// several tasks and leave others idle; they are scored as-is.
    None,

    /// Replace duplicated agents with the idle ones so every offspring is a
    /// valid one-to-one assignment.
    #[default]
    FillMissing,
}

/// One candidate assignment of tasks to agents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    agents: Vec<usize>,
    fitness: u64,
}

impl Assignment {
    /// Wraps an agent vector. The fitness is unset until evaluated.
    pub fn new(agents: Vec<usize>) -> Self {
        Self {
            agents,
            fitness: u64::worst(),
        }
    }

    /// Agent index per task.
    pub fn agents(&self) -> &[usize] {
        &self.agents
    }

    pub fn into_agents(self) -> Vec<usize> {
        self.agents
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Whether every agent is used exactly once.
    pub fn is_valid(&self) -> bool {
        is_permutation(&self.agents, self.agents.len())
    }

    /// `(task, agent)` pairs in task order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.agents.iter().copied().enumerate()
    }
}

impl Individual for Assignment {
    type Fitness = u64;

    fn fitness(&self) -> u64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: u64) {
        self.fitness = fitness;
    }
}

/// Total cost of `agents` under `matrix`. Pure; O(N).
///
/// # Panics
/// Panics if `agents` does not have one in-range agent per task.
pub fn fitness(agents: &[usize], matrix: &CostMatrix) -> u64 {
    matrix.assignment_cost(agents)
}

/// Task-to-agent assignment over a borrowed cost matrix.
///
/// - initialization: uniformly random permutation of `0..N`
/// - crossover: [`midpoint_crossover`], followed by the [`Repair`] policy
/// - mutation: [`swap_mutation`]
#[derive(Debug, Clone, Copy)]
pub struct AssignmentProblem<'a> {
    matrix: &'a CostMatrix,
    repair: Repair,
}

impl<'a> AssignmentProblem<'a> {
    pub fn new(matrix: &'a CostMatrix) -> Self {
        Self {
            matrix,
            repair: Repair::default(),
        }
    }

    pub fn with_repair(mut self, repair: Repair) -> Self {
        self.repair = repair;
        self
    }

    pub fn matrix(&self) -> &'a CostMatrix {
        self.matrix
    }

    pub fn repair(&self) -> Repair {
        self.repair
    }
}

impl GaProblem for AssignmentProblem<'_> {
    type Individual = Assignment;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Assignment {
        Assignment::new(random_permutation(self.matrix.size(), rng))
    }

    fn evaluate(&self, individual: &Assignment) -> u64 {
        fitness(&individual.agents, self.matrix)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Assignment,
        parent2: &Assignment,
        _rng: &mut R,
    ) -> Assignment {
        let mut agents = midpoint_crossover(&parent1.agents, &parent2.agents);
        if self.repair == Repair::FillMissing {
            repair_permutation(&mut agents);
        }
        Assignment::new(agents)
    }

    fn mutate<R: Rng>(&self, individual: &mut Assignment, rng: &mut R) {
        swap_mutation(&mut individual.agents, rng);
    }
}
