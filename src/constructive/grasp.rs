//! GRASP construction with a Restricted Candidate List (RCL).
//!
//! # Algorithm
//!
//! From the last placed location, measure the distance to every unplaced
//! candidate. With `min`/`max` the extreme distances, the RCL holds every
//! candidate within
//!
//! ```text
//! threshold = min + alpha * (max - min)
//! ```
//!
//! and the next location is drawn uniformly from it. `alpha = 0` is pure
//! greedy, `alpha = 1` pure random.
//!
//! # Reference
//!
//! Feo, T.A. & Resende, M.G.C. (1995). "Greedy Randomized Adaptive Search
//! Procedures", *Journal of Global Optimization* 6, 109-133.

use rand::Rng;

use crate::models::{Instance, Tour};

/// Builds a tour from the depot by repeated RCL draws.
///
/// `alpha` is expected in `[0, 1]`; values outside are clamped and NaN is
/// read as `0` (greedy).
///
/// # Examples
///
/// ```
/// use depot_routing::models::{Instance, Point, Vehicle};
/// use depot_routing::constructive::grasp_construction;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let points = vec![
///     Point::depot(0, 0.0, 0.0),
///     Point::customer(1, 3.0, 0.0),
///     Point::customer(2, 1.0, 0.0),
///     Point::customer(3, 2.0, 0.0),
/// ];
/// let instance = Instance::new(points, vec![], Vehicle::new(10, 0)).unwrap();
///
/// // alpha = 0 is plain nearest-neighbour
/// let tour = grasp_construction(&instance, 0.0, &mut StdRng::seed_from_u64(1));
/// assert_eq!(tour.locations(), &[0, 2, 3, 1]);
/// ```
pub fn grasp_construction<R: Rng + ?Sized>(instance: &Instance, alpha: f64, rng: &mut R) -> Tour {
    let alpha = if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    };
    let mut remaining = instance.customers();
    let mut order = Vec::with_capacity(instance.len());
    let mut rcl: Vec<usize> = Vec::with_capacity(remaining.len());

    let mut last = instance.depot();
    order.push(last);

    while !remaining.is_empty() {
        let row = instance.distances().row(last);
        let (min, max) = remaining
            .iter()
            .map(|&c| row[c])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            });
        let threshold = min + alpha * (max - min);

        rcl.clear();
        rcl.extend(
            remaining
                .iter()
                .enumerate()
                .filter(|(_, &c)| row[c] <= threshold)
                .map(|(slot, _)| slot),
        );

        // non-comparable distances leave the RCL empty; take the first
        // nearest candidate instead
        let slot = if rcl.is_empty() {
            nearest_slot(&remaining, row)
        } else {
            rcl[rng.random_range(0..rcl.len())]
        };
        let next = remaining.swap_remove(slot);
        order.push(next);
        last = next;
    }

    Tour::new(order)
}

fn nearest_slot(remaining: &[usize], row: &[f64]) -> usize {
    let mut best = (0, f64::INFINITY);
    for (slot, &c) in remaining.iter().enumerate() {
        if row[c] < best.1 {
            best = (slot, row[c]);
        }
    }
    best.0
}
