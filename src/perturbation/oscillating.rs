//! Oscillating swap-count perturbation.
//!
//! The number of random swaps follows the one-dimensional Ackley function of
//! the driver iteration, scaled by 1.5: zero at iteration 0, rising quickly
//! towards 30 as the search goes on.

use std::f64::consts::{E, PI};

use rand::Rng;

use super::anchor_depot;

const ACKLEY_A: f64 = 20.0;
const ACKLEY_B: f64 = 0.2;
const ACKLEY_C: f64 = 2.0 * PI;
const SWAP_SCALE: f64 = 1.5;

/// One-dimensional Ackley function at `t`.
pub fn ackley(t: f64) -> f64 {
    -ACKLEY_A * (-ACKLEY_B * (t * t).sqrt()).exp() - (ACKLEY_C * t).cos().exp() + ACKLEY_A + E
}

/// Swaps `⌊1.5 · ackley(iteration)⌋` random pairs of positions after the depot.
///
/// A draw may pick the same position twice, which makes that swap a no-op.
/// Needs at least two customers.
pub fn oscillating_swap<R: Rng + ?Sized>(
    tour: &mut [usize],
    depot: usize,
    iteration: usize,
    rng: &mut R,
) {
    let start = anchor_depot(tour, depot);
    let n = tour.len();
    if n - start < 2 {
        return;
    }

    let swaps = (ackley(iteration as f64) * SWAP_SCALE).max(0.0) as usize;
    for _ in 0..swaps {
        let i = rng.random_range(start..n);
        let j = rng.random_range(start..n);
        tour.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ackley_zero_at_origin() {
        assert!(ackley(0.0).abs() < 1e-10);
    }

    #[test]
    fn test_ackley_grows_on_integers() {
        // cos(2πt) = 1 on integers, so the value is 20 - 20·e^(-0.2t)
        let a1 = ackley(1.0);
        assert!((a1 - (20.0 - 20.0 * (-0.2f64).exp())).abs() < 1e-9);
        assert!(ackley(10.0) > ackley(5.0));
        assert!(ackley(100.0) < 20.0 + 1e-9);
    }

    #[test]
    fn test_iteration_zero_is_identity() {
        let mut tour: Vec<usize> = (0..6).collect();
        oscillating_swap(&mut tour, 0, 0, &mut StdRng::seed_from_u64(3));
        assert_eq!(tour, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_late_iteration_shuffles() {
        let mut tour: Vec<usize> = (0..12).collect();
        oscillating_swap(&mut tour, 0, 50, &mut StdRng::seed_from_u64(3));
        assert_eq!(tour[0], 0);
        assert_ne!(tour, (0..12).collect::<Vec<_>>());
    }
}
