// src/sampler.rs
// =============================================================================
// Picks a bounded number of distinct entries from a list, at random.
//
// Algorithm (rejection sampling):
// - Draw an index uniformly from 0..n
// - Keep it if we haven't accepted it yet, otherwise draw again
// - Stop once we have min(k, n) indices
// - Map the indices (in draw order) back to their records
//
// For k much smaller than n (30 out of a few hundred contributors) the number
// of wasted draws is tiny, and we never have to shuffle the whole list.
//
// The size is capped at n before the loop starts: asking for 30 out of 12
// would otherwise spin forever once all 12 indices are taken.
//
// Rust concepts:
// - Generics: sample() works for any Clone element type
// - Trait bounds: any `Rng` can be the random source, so tests pass a seeded one
// =============================================================================

use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SampleError {
    #[error("cannot sample from an empty list")]
    EmptyList,
}

// Chooses min(k, n) distinct indices from 0..n, in the order they were drawn
//
// Returns SampleError::EmptyList when n == 0
pub fn sample_indices<R: Rng + ?Sized>(
    n: usize,
    k: usize,
    rng: &mut R,
) -> Result<Vec<usize>, SampleError> {
    if n == 0 {
        return Err(SampleError::EmptyList);
    }

    let k = k.min(n);
    let mut accepted = Vec::with_capacity(k);
    let mut seen = HashSet::with_capacity(k);

    while accepted.len() < k {
        let candidate = rng.gen_range(0..n);
        // insert() returns false when the index was already taken
        if seen.insert(candidate) {
            accepted.push(candidate);
        }
    }

    Ok(accepted)
}

// Returns min(k, items.len()) distinct items, cloned, in draw order
pub fn sample<T: Clone, R: Rng + ?Sized>(
    items: &[T],
    k: usize,
    rng: &mut R,
) -> Result<Vec<T>, SampleError> {
    let indices = sample_indices(items.len(), k, rng)?;
    Ok(indices.into_iter().map(|i| items[i].clone()).collect())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `R: Rng + ?Sized`?
//    - ?Sized lets callers pass `&mut dyn RngCore` as well as concrete types
//    - Production code passes StdRng::from_entropy(), tests pass a seeded one
//
// 2. Why both a Vec and a HashSet?
//    - The HashSet answers "did we already pick this?" in O(1)
//    - The Vec remembers the order the indices were drawn in
//
// 3. What does gen_range(0..n) do?
//    - Returns a uniformly distributed integer in [0, n)
//    - 0..n is a Range, the upper bound is excluded
// -----------------------------------------------------------------------------
