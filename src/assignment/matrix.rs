//! Square cost matrices.

use crate::error::{Error, Result};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable N×N grid of non-negative costs.
///
/// `cost(i, j)` is the cost of assigning task `i` to agent `j`. Entries are
/// stored row-major. A `CostMatrix` is always square with `N ≥ 1`; every
/// constructor enforces this.
///
/// ```
/// use u_assign::assignment::CostMatrix;
///
/// let m = CostMatrix::new(vec![vec![4, 1], vec![2, 3]]).unwrap();
/// assert_eq!(m.size(), 2);
/// assert_eq!(m.cost(0, 1), 1);
/// assert_eq!(m.assignment_cost(&[1, 0]), 3);
///
/// assert!(CostMatrix::new(vec![vec![1, 2]]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")
)]
pub struct CostMatrix {
    n: usize,
    costs: Vec<u32>,
}

impl CostMatrix {
    /// Builds a matrix from rows.
    ///
    /// # Errors
    /// [`Error::InvalidInput`] if there are no rows or any row length differs
    /// from the row count.
    pub fn new(rows: Vec<Vec<u32>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(Error::input("cost matrix is empty"));
        }
        let mut costs = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(Error::input(format!(
                    "cost matrix must be square: row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            costs.extend(row);
        }
        Ok(Self { n, costs })
    }

    /// Builds a matrix from signed rows, rejecting negative costs.
    ///
    /// # Errors
    /// [`Error::InvalidInput`] on a negative or oversized entry, or on the
    /// shape errors of [`new`](Self::new).
    pub fn from_signed(rows: &[Vec<i64>]) -> Result<Self> {
        let converted = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, &c)| {
                        u32::try_from(c).map_err(|_| {
                            Error::input(format!(
                                "cost at ({i}, {j}) must be within [0, {}], got {c}",
                                u32::MAX
                            ))
                        })
                    })
                    .collect::<Result<Vec<u32>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(converted)
    }

    /// Generates an `n`×`n` instance with costs drawn uniformly from
    /// `1..=max_cost`.
    ///
    /// Demo instances use `max_cost = 10` for tens of tasks and
    /// `max_cost = 100` for hundreds or more.
    ///
    /// # Errors
    /// [`Error::InvalidInput`] if `n == 0` or `max_cost == 0`.
    pub fn random<R: Rng>(n: usize, max_cost: u32, rng: &mut R) -> Result<Self> {
        if n == 0 {
            return Err(Error::input("cost matrix is empty"));
        }
        if max_cost == 0 {
            return Err(Error::input("max_cost must be at least 1"));
        }
        let costs = (0..n * n)
            .map(|_| rng.random_range(1..=max_cost))
            .collect();
        Ok(Self { n, costs })
    }

    /// The 4×4 demonstration instance. Its optimal assignment costs 13.
    pub fn demo_small() -> Self {
        Self {
            n: 4,
            costs: vec![
                9, 2, 7, 8, //
                6, 4, 3, 7, //
                5, 8, 1, 8, //
                7, 6, 9, 4,
            ],
        }
    }

    /// Number of tasks (and agents).
    pub fn size(&self) -> usize {
        self.n
    }

    /// Cost of assigning `task` to `agent`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn cost(&self, task: usize, agent: usize) -> u32 {
        assert!(agent < self.n, "agent {agent} out of range for size {}", self.n);
        self.costs[task * self.n + agent]
    }

    /// All agent costs for one task.
    pub fn row(&self, task: usize) -> &[u32] {
        &self.costs[task * self.n..(task + 1) * self.n]
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.costs.chunks_exact(self.n)
    }

    /// Total cost `Σ cost(i, agents[i])`.
    ///
    /// Duplicated agents are allowed and simply counted once per task.
    ///
    /// # Panics
    /// Panics if `agents.len() != N` or an agent index is out of range; use
    /// [`checked_assignment_cost`](Self::checked_assignment_cost) for
    /// untrusted input.
    pub fn assignment_cost(&self, agents: &[usize]) -> u64 {
        assert_eq!(
            agents.len(),
            self.n,
            "assignment length must match matrix size"
        );
        self.rows()
            .zip(agents)
            .map(|(row, &agent)| u64::from(row[agent]))
            .sum()
    }

    /// Like [`assignment_cost`](Self::assignment_cost) but reports bad input
    /// as [`Error::InvalidInput`] instead of panicking.
    pub fn checked_assignment_cost(&self, agents: &[usize]) -> Result<u64> {
        if agents.len() != self.n {
            return Err(Error::input(format!(
                "assignment has {} tasks, matrix has {}",
                agents.len(),
                self.n
            )));
        }
        if let Some((task, &agent)) = agents.iter().enumerate().find(|(_, &a)| a >= self.n) {
            return Err(Error::input(format!(
                "task {task} assigned to agent {agent}, but only {} agents exist",
                self.n
            )));
        }
        Ok(self.assignment_cost(agents))
    }
}

impl TryFrom<Vec<Vec<u32>>> for CostMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<CostMatrix> for Vec<Vec<u32>> {
    fn from(matrix: CostMatrix) -> Self {
        matrix.rows().map(<[u32]>::to_vec).collect()
    }
}
