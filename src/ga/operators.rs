//! Permutation operators.
//!
//! These work on plain `&[usize]` index vectors, where position `i` holds
//! the value assigned to slot `i`.
//!
//! # Construction
//!
//! - [`random_permutation`]: uniformly random permutation of `0..n`
//!
//! # Crossover
//!
//! - [`midpoint_crossover`]: single-point crossover at `n / 2`. Combining two
//!   permutations this way usually duplicates some values.
//! - [`repair_permutation`]: replaces duplicates with the missing values so
//!   the result is a permutation again.
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange two random positions, O(1)

use rand::seq::SliceRandom;
use rand::Rng;

/// Generates the identity sequence `0..n` and shuffles it uniformly.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

/// Single-point crossover at the midpoint.
///
/// With `mid = n / 2` the child is `parent1[..mid]` followed by
/// `parent2[mid..]`. No attempt is made to keep the child a permutation;
/// see [`repair_permutation`].
///
/// ```
/// use u_assign::ga::operators::midpoint_crossover;
///
/// let child = midpoint_crossover(&[0, 1, 2, 3], &[3, 2, 1, 0]);
/// assert_eq!(child, vec![0, 1, 1, 0]);
/// ```
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn midpoint_crossover(parent1: &[usize], parent2: &[usize]) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    let mid = n / 2;
    let mut child = Vec::with_capacity(n);
    child.extend_from_slice(&parent1[..mid]);
    child.extend_from_slice(&parent2[mid..]);
    child
}

/// Restores permutation validity in place.
///
/// Scanning left to right, the first occurrence of each value is kept.
/// Later duplicates and values outside `0..n` are replaced by the missing
/// values in ascending order. A slice that already is a permutation is left
/// untouched.
///
/// ```
/// use u_assign::ga::operators::repair_permutation;
///
/// let mut child = vec![0, 1, 1, 0];
/// repair_permutation(&mut child);
/// assert_eq!(child, vec![0, 1, 2, 3]);
/// ```
///
/// # Complexity
/// O(n) time, O(n) space
pub fn repair_permutation(perm: &mut [usize]) {
    let n = perm.len();
    let mut seen = vec![false; n];
    let mut conflicts = Vec::new();

    for (pos, &value) in perm.iter().enumerate() {
        if value < n && !seen[value] {
            seen[value] = true;
        } else {
            conflicts.push(pos);
        }
    }

    let missing = seen
        .iter()
        .enumerate()
        .filter(|(_, &present)| !present)
        .map(|(value, _)| value);

    for (pos, value) in conflicts.into_iter().zip(missing) {
        perm[pos] = value;
    }
}

/// Swap mutation: exchange two positions drawn independently and uniformly.
///
/// The two positions may coincide, in which case nothing changes.
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    perm.swap(i, j);
}

/// Checks that `perm` is a permutation of `0..n`.
pub fn is_permutation(perm: &[usize], n: usize) -> bool {
    if perm.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &value in perm {
        if value >= n || seen[value] {
            return false;
        }
        seen[value] = true;
    }
    true
}
