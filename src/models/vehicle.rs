//! Vehicle type with capacity and depot endpoints.

use serde::{Deserialize, Serialize};

/// A vehicle that services routes in a routing problem.
///
/// Every trip starts and ends at the depot. The fleet is homogeneous: an
/// instance holds one vehicle template whose capacity bounds every route.
///
/// # Examples
///
/// ```
/// use depot_routing::models::Vehicle;
///
/// let v = Vehicle::new(200, 0);
/// assert_eq!(v.capacity(), 200);
/// assert_eq!(v.start(), 0);
/// assert_eq!(v.end(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    capacity: i32,
    start: usize,
    end: usize,
}

impl Vehicle {
    /// Creates a vehicle with the given capacity starting and ending at `depot_id`.
    pub fn new(capacity: i32, depot_id: usize) -> Self {
        Self {
            capacity,
            start: depot_id,
            end: depot_id,
        }
    }

    /// Sets the start point.
    pub fn with_start(mut self, point_id: usize) -> Self {
        self.start = point_id;
        self
    }

    /// Sets the end point.
    pub fn with_end(mut self, point_id: usize) -> Self {
        self.end = point_id;
        self
    }

    /// Maximum load capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Start point id.
    pub fn start(&self) -> usize {
        self.start
    }

    /// End point id.
    pub fn end(&self) -> usize {
        self.end
    }
}
