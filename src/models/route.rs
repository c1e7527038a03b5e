//! Route type.

use serde::{Deserialize, Serialize};

/// One vehicle trip: the depot, a block of customers, the depot again.
///
/// Stops are point ids (not location indices) so a route can be reported
/// without its instance.
///
/// # Examples
///
/// ```
/// use depot_routing::models::Route;
///
/// let route = Route::new(vec![0, 4, 2, 0], 12.5, 30);
/// assert_eq!(route.customer_ids(), &[4, 2]);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.total_load(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    stops: Vec<usize>,
    total_distance: f64,
    total_load: i32,
}

impl Route {
    /// Creates a route from its full stop list (depot at both ends).
    pub fn new(stops: Vec<usize>, total_distance: f64, total_load: i32) -> Self {
        Self {
            stops,
            total_distance,
            total_load,
        }
    }

    /// Full stop sequence, depot first and last.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Customer point ids in visit order (depot excluded).
    pub fn customer_ids(&self) -> &[usize] {
        if self.stops.len() < 2 {
            return &[];
        }
        &self.stops[1..self.stops.len() - 1]
    }

    /// Returns the number of customer visits (excluding depot).
    pub fn len(&self) -> usize {
        self.customer_ids().len()
    }

    /// Returns `true` if this route has no customer visits.
    pub fn is_empty(&self) -> bool {
        self.customer_ids().is_empty()
    }

    /// Depot-to-depot travel distance.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Sum of demand quantities served.
    pub fn total_load(&self) -> i32 {
        self.total_load
    }

    pub(crate) fn set_stops(&mut self, stops: Vec<usize>, total_distance: f64) {
        self.stops = stops;
        self.total_distance = total_distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_customers() {
        let r = Route::new(vec![9, 1, 2, 3, 9], 10.0, 7);
        assert_eq!(r.stops(), &[9, 1, 2, 3, 9]);
        assert_eq!(r.customer_ids(), &[1, 2, 3]);
        assert_eq!(r.len(), 3);
        assert!(!r.is_empty());
    }

    #[test]
    fn test_route_degenerate() {
        let r = Route::new(vec![9], 0.0, 0);
        assert!(r.is_empty());
        assert_eq!(r.customer_ids(), &[] as &[usize]);
    }
}
