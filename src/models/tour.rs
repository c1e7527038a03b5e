//! Visiting order over every location of an instance.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};

/// A tour: a permutation of location indices, read as a cycle.
///
/// Construction heuristics create tours, local search and perturbation
/// rewrite them in place, and decomposition cuts them into routes. A tour
/// knows nothing about capacity.
///
/// # Examples
///
/// ```
/// use depot_routing::models::Tour;
///
/// let mut tour = Tour::new(vec![2, 3, 0, 1]);
/// tour.reorder_depot_first(0).unwrap();
/// assert_eq!(tour.locations(), &[0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    locations: Vec<usize>,
}

impl Tour {
    /// Wraps a location permutation.
    pub fn new(locations: Vec<usize>) -> Self {
        Self { locations }
    }

    /// Location indices in visiting order.
    pub fn locations(&self) -> &[usize] {
        &self.locations
    }

    /// Mutable access for in-place operators.
    pub fn locations_mut(&mut self) -> &mut Vec<usize> {
        &mut self.locations
    }

    /// Unwraps the permutation.
    pub fn into_locations(self) -> Vec<usize> {
        self.locations
    }

    /// Number of locations in this tour.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns true if the tour is empty.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Total length; `closed` adds the leg from the last location back to the first.
    pub fn length(&self, distances: &DistanceMatrix, closed: bool) -> f64 {
        tour_length(&self.locations, distances, closed)
    }

    /// Position of `location` in the tour.
    pub fn position(&self, location: usize) -> Option<usize> {
        self.locations.iter().position(|&l| l == location)
    }

    /// Rotates the tour so `depot` comes first, keeping the cyclic order.
    pub fn reorder_depot_first(&mut self, depot: usize) -> Result<()> {
        let pos = self.position(depot).ok_or(RoutingError::NoDepotFound)?;
        self.locations.rotate_left(pos);
        Ok(())
    }
}

/// Sum of consecutive distances over `locations`, optionally closing the cycle.
///
/// Sequences of fewer than two locations have length zero.
pub fn tour_length(locations: &[usize], distances: &DistanceMatrix, closed: bool) -> f64 {
    if locations.len() < 2 {
        return 0.0;
    }
    let open: f64 = locations
        .windows(2)
        .map(|w| distances.get(w[0], w[1]))
        .sum();
    if closed {
        open + distances.get(locations[locations.len() - 1], locations[0])
    } else {
        open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Metric;
    use crate::models::Point;

    fn square() -> DistanceMatrix {
        let points = vec![
            Point::depot(0, 0.0, 0.0),
            Point::customer(1, 1.0, 0.0),
            Point::customer(2, 1.0, 1.0),
            Point::customer(3, 0.0, 1.0),
        ];
        DistanceMatrix::from_points(&points, Metric::Euclidean)
    }

    #[test]
    fn test_open_and_closed_length() {
        let dm = square();
        let tour = Tour::new(vec![0, 1, 2, 3]);
        assert!((tour.length(&dm, false) - 3.0).abs() < 1e-10);
        assert!((tour.length(&dm, true) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_short_tours_have_zero_length() {
        let dm = square();
        assert_eq!(Tour::new(vec![]).length(&dm, true), 0.0);
        assert_eq!(Tour::new(vec![2]).length(&dm, true), 0.0);
    }

    #[test]
    fn test_rotation_keeps_closed_length() {
        let dm = square();
        let a = Tour::new(vec![0, 2, 1, 3]);
        let mut b = Tour::new(vec![1, 3, 0, 2]);
        assert!((a.length(&dm, true) - b.length(&dm, true)).abs() < 1e-10);
        b.reorder_depot_first(0).expect("depot present");
        assert_eq!(b, a);
    }

    #[test]
    fn test_reorder_without_depot() {
        let mut t = Tour::new(vec![1, 2, 3]);
        assert_eq!(t.reorder_depot_first(0), Err(RoutingError::NoDepotFound));
        assert_eq!(t.locations(), &[1, 2, 3]);
    }
}
