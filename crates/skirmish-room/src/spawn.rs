//! Spawn placement and skin allocation.
//!
//! Stateless functions over an injected [`Rng`] so every randomized code
//! path can be driven by a seeded generator in tests. The room owns the
//! generator; nothing here keeps state between calls.

use rand::seq::SliceRandom;
use rand::Rng;

/// Returns a uniformly shuffled copy of `pool`.
pub fn permute<T: Clone>(pool: &[T], rng: &mut impl Rng) -> Vec<T> {
    let mut out = pool.to_vec();
    out.shuffle(rng);
    out
}

/// Draws one element by taking the head of a fresh permutation.
///
/// Draws are independent: nothing marks an element as taken, so repeated
/// calls can hand out the same element twice. Returns `None` on an empty
/// pool.
pub fn allocate<T: Clone>(pool: &[T], rng: &mut impl Rng) -> Option<T> {
    permute(pool, rng).into_iter().next()
}

/// Picks a spawn coordinate pair on the square world plane.
///
/// Each axis is a floored uniform draw in
/// `[-plane_size/2, plane_size/2)`. A non-positive plane degenerates to
/// the origin.
pub fn plane_spawn(plane_size: f64, rng: &mut impl Rng) -> (f64, f64) {
    if plane_size <= 0.0 {
        return (0.0, 0.0);
    }
    let x = rng.random_range(0.0..plane_size).floor() - plane_size / 2.0;
    let z = rng.random_range(0.0..plane_size).floor() - plane_size / 2.0;
    (x, z)
}

/// Picks a uniform spawn-point index in `[0, points_length)`.
///
/// Fewer than two points leaves no choice to make; the index degenerates
/// to `0`.
pub fn point_spawn(points_length: u32, rng: &mut impl Rng) -> u32 {
    if points_length <= 1 {
        return 0;
    }
    rng.random_range(0..points_length)
}
