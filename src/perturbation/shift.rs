//! Triple-shift perturbation.

use rand::seq::index::sample;
use rand::Rng;

use super::anchor_depot;

/// Picks three distinct positions after the depot and rotates their values
/// (`a ← c, b ← a, c ← b`).
///
/// Needs at least three customers; shorter tours are left unchanged.
///
/// # Examples
///
/// ```
/// use depot_routing::perturbation::triple_shift;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut tour = vec![0, 1, 2, 3];
/// triple_shift(&mut tour, 0, &mut StdRng::seed_from_u64(1));
/// assert_eq!(tour[0], 0);
/// assert_ne!(tour, vec![0, 1, 2, 3]);
/// ```
pub fn triple_shift<R: Rng + ?Sized>(tour: &mut [usize], depot: usize, rng: &mut R) {
    let start = anchor_depot(tour, depot);
    let movable = tour.len() - start;
    if movable < 3 {
        return;
    }

    let picks = sample(rng, movable, 3);
    let (a, b, c) = (
        start + picks.index(0),
        start + picks.index(1),
        start + picks.index(2),
    );
    let (va, vb, vc) = (tour[a], tour[b], tour[c]);
    tour[a] = vc;
    tour[b] = va;
    tour[c] = vb;
}
