//! Points of the routing network.

use serde::{Deserialize, Serialize};

/// Role of a point in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointRole {
    /// Start and end of every vehicle trip.
    Depot,
    /// A delivery location.
    Customer,
}

/// A location (depot or customer) in a routing problem.
///
/// Coordinates are an `(x, y)` pair; under the great-circle metric they are
/// read as `(longitude, latitude)` in radians.
///
/// # Examples
///
/// ```
/// use depot_routing::models::{Point, PointRole};
///
/// let depot = Point::depot(101, 35.0, 35.0);
/// assert_eq!(depot.id(), 101);
/// assert!(depot.is_depot());
///
/// let c = Point::customer(1, 41.0, 49.0);
/// assert_eq!(c.role(), PointRole::Customer);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    id: usize,
    x: f64,
    y: f64,
    role: PointRole,
}

impl Point {
    /// Creates a point with an explicit role.
    pub fn new(id: usize, x: f64, y: f64, role: PointRole) -> Self {
        Self { id, x, y, role }
    }

    /// Creates a depot point.
    pub fn depot(id: usize, x: f64, y: f64) -> Self {
        Self::new(id, x, y, PointRole::Depot)
    }

    /// Creates a customer point.
    pub fn customer(id: usize, x: f64, y: f64) -> Self {
        Self::new(id, x, y, PointRole::Customer)
    }

    /// Point identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate (longitude under the great-circle metric).
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate (latitude under the great-circle metric).
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Coordinate pair.
    pub fn coords(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Role of this point.
    pub fn role(&self) -> PointRole {
        self.role
    }

    /// Returns `true` for the depot.
    pub fn is_depot(&self) -> bool {
        self.role == PointRole::Depot
    }
}
