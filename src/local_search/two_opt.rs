//! 2-opt improvement of a closed tour.
//!
//! # Algorithm
//!
//! For every pair of positions `i < k`, reversing `tour[i..=k]` replaces the
//! edges `(prev, tour[i])` and `(tour[k], next)` of the cycle by
//! `(prev, tour[k])` and `(tour[i], next)`:
//!
//! ```text
//! delta = d(prev, t[k]) + d(t[i], next) - d(prev, t[i]) - d(t[k], next)
//! ```
//!
//! If delta < 0, the reversal is applied immediately and the scan continues
//! (first-improvement). Full passes repeat until one makes no change.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;
use crate::models::tour_length;

/// Minimum gain for a reversal to count as an improvement.
const IMPROVEMENT_EPS: f64 = 1e-10;

/// Improves `tour` in place to a 2-opt local optimum of its closed length.
///
/// Returns the final closed-tour length. Applying it again to its own output
/// changes nothing.
///
/// # Examples
///
/// ```
/// use depot_routing::models::Point;
/// use depot_routing::distance::{DistanceMatrix, Metric};
/// use depot_routing::local_search::two_opt;
///
/// let points = vec![
///     Point::depot(0, 0.0, 0.0),
///     Point::customer(1, 1.0, 0.0),
///     Point::customer(2, 1.0, 1.0),
///     Point::customer(3, 0.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points, Metric::Euclidean);
///
/// // 0 → 2 → 1 → 3 crosses itself
/// let mut tour = vec![0, 2, 1, 3];
/// let len = two_opt(&mut tour, &dm);
/// assert!((len - 4.0).abs() < 1e-10);
/// ```
pub fn two_opt(tour: &mut [usize], distances: &DistanceMatrix) -> f64 {
    let n = tour.len();
    if n < 4 {
        // every ordering of three or fewer locations is the same cycle
        return tour_length(tour, distances, true);
    }

    let mut improved = true;
    while improved {
        improved = false;
        for i in 0..n - 1 {
            for k in i + 1..n {
                if i == 0 && k == n - 1 {
                    continue;
                }
                if reversal_delta(tour, distances, i, k) < -IMPROVEMENT_EPS {
                    tour[i..=k].reverse();
                    improved = true;
                }
            }
        }
    }

    tour_length(tour, distances, true)
}

/// Change in closed length from reversing `tour[i..=k]`.
///
/// The whole-tour reversal `(0, n-1)` must be excluded by the caller: its
/// neighbours wrap onto the segment itself.
fn reversal_delta(tour: &[usize], distances: &DistanceMatrix, i: usize, k: usize) -> f64 {
    let n = tour.len();
    let prev = tour[(i + n - 1) % n];
    let next = tour[(k + 1) % n];

    let old_cost = distances.get(prev, tour[i]) + distances.get(tour[k], next);
    let new_cost = distances.get(prev, tour[k]) + distances.get(tour[i], next);

    new_cost - old_cost
}
