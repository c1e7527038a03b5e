//! Replace-pair perturbation for partial tours.

use rand::seq::index::sample;
use rand::Rng;

use super::anchor_depot;

/// Replaces the locations at two random positions after the depot with two
/// distinct locations from `pool` that are not in `tour`.
///
/// Only meaningful when `tour` is a proper subset of `pool` (single-route
/// refinement); with fewer than two unused locations, or fewer than two
/// customers, the tour is left unchanged.
///
/// # Examples
///
/// ```
/// use depot_routing::perturbation::replace_pair;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let pool: Vec<usize> = (0..6).collect();
/// let mut tour = vec![0, 1, 2];
/// replace_pair(&mut tour, 0, &pool, &mut StdRng::seed_from_u64(8));
/// assert_eq!(tour[0], 0);
/// assert!(tour[1] >= 3 && tour[2] >= 3);
/// ```
pub fn replace_pair<R: Rng + ?Sized>(
    tour: &mut [usize],
    depot: usize,
    pool: &[usize],
    rng: &mut R,
) {
    let start = anchor_depot(tour, depot);
    let movable = tour.len() - start;
    if movable < 2 {
        return;
    }

    let unused: Vec<usize> = pool
        .iter()
        .copied()
        .filter(|&l| l != depot && !tour.contains(&l))
        .collect();
    if unused.len() < 2 {
        return;
    }

    let positions = sample(rng, movable, 2);
    let incoming = sample(rng, unused.len(), 2);
    for k in 0..2 {
        tour[start + positions.index(k)] = unused[incoming.index(k)];
    }
}
