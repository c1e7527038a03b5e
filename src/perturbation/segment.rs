//! Segment-reorder perturbation.

use rand::seq::index::sample;
use rand::Rng;

use super::anchor_depot;

/// Cuts the tour at three random points after the depot and exchanges the
/// two interior segments: `A B C D → A C B D`.
///
/// Needs at least two customers; shorter tours are left unchanged.
pub fn segment_reorder<R: Rng + ?Sized>(tour: &mut [usize], depot: usize, rng: &mut R) {
    let start = anchor_depot(tour, depot);
    let movable = tour.len() - start;
    if movable < 2 {
        return;
    }

    // cut points live in start..=len, so segments B and C are never empty
    let mut cuts = sample(rng, movable + 1, 3).into_vec();
    cuts.sort_unstable();
    let (a, b, c) = (start + cuts[0], start + cuts[1], start + cuts[2]);
    tour[a..c].rotate_left(b - a);
}
