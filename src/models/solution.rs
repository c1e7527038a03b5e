//! Solution type.

use serde::{Deserialize, Serialize};

use super::Route;

/// A complete set of routes covering every customer exactly once.
///
/// # Examples
///
/// ```
/// use depot_routing::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::new(vec![0, 1, 0], 2.0, 5));
/// sol.add_route(Route::new(vec![0, 2, 3, 0], 6.0, 8));
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 3);
/// assert!((sol.total_distance() - 8.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns a mutable reference to the routes.
    pub fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    /// Returns the number of routes (vehicle trips).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.total_distance()).sum()
    }

    /// Total number of customers served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Customer point ids of all routes, concatenated in route order.
    pub fn customer_sequence(&self) -> Vec<usize> {
        self.routes
            .iter()
            .flat_map(|r| r.customer_ids().iter().copied())
            .collect()
    }
}
