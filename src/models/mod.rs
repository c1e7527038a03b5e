//! Domain model types for single-depot capacitated routing.
//!
//! Points, demands and the vehicle template are validated once into an
//! [`Instance`]; a [`Tour`] is a visiting order over its locations, and a
//! [`Solution`] is the set of capacity-feasible [`Route`]s cut from a tour.

mod demand;
mod instance;
mod point;
mod route;
mod solution;
mod tour;
mod vehicle;

pub use demand::Demand;
pub use instance::Instance;
pub use point::{Point, PointRole};
pub use route::Route;
pub use solution::Solution;
pub use tour::{tour_length, Tour};
pub use vehicle::Vehicle;
