//! # depot-routing
//!
//! Capacitated single-depot vehicle routing: build a tour over every point,
//! improve it with 2-opt based metaheuristics, then cut it into
//! capacity-feasible depot-to-depot routes.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Point, Demand, Vehicle, Instance, Tour, Route, Solution)
//! - [`distance`] — Euclidean or great-circle distance matrix
//! - [`constructive`] — Tour construction (Nearest Neighbor, Randomized, GRASP, Pilot)
//! - [`local_search`] — 2-opt
//! - [`perturbation`] — Kicks applied between descents
//! - [`metaheuristic`] — Iterated Local Search and GRASP drivers, progress and cancellation
//! - [`decomposition`] — Optimal capacity split of a tour into routes
//! - [`evaluation`] — Solution feasibility checking and cost evaluation
//! - [`search`] — Parallel multi-trial orchestration
//!
//! ## Example
//!
//! ```
//! use depot_routing::models::{Demand, Instance, Point, Vehicle};
//! use depot_routing::search::{SearchConfig, Solver};
//!
//! let points = vec![
//!     Point::depot(0, 0.0, 0.0),
//!     Point::customer(1, 2.0, 0.0),
//!     Point::customer(2, 2.0, 2.0),
//!     Point::customer(3, -2.0, 2.0),
//!     Point::customer(4, -2.0, 0.0),
//! ];
//! let demands = (1..=4).map(|i| Demand::new(i, i, 5)).collect();
//! let instance = Instance::new(points, demands, Vehicle::new(10, 0)).unwrap();
//!
//! let result = Solver::new(&instance, SearchConfig::default()).unwrap().solve().unwrap();
//! assert!(result.solution.num_routes() >= 2);
//! assert_eq!(result.solution.num_served(), 4);
//! for route in result.solution.routes() {
//!     assert!(route.total_load() <= 10);
//! }
//! ```

pub mod constructive;
pub mod decomposition;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod metaheuristic;
pub mod models;
pub mod perturbation;
pub mod search;

pub use error::{Result, RoutingError};
